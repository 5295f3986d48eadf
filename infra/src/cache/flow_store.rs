//! In-memory flow store
//!
//! Each flow sits behind its own async mutex. Checking a flow out takes the
//! mutex without waiting, so a second submission on the same flow fails
//! with `SubmissionInProgress` instead of queueing. Read-only callers use
//! `peek`, which never waits on a submission and never extends the TTL.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::debug;
use uuid::Uuid;

use cw_core::domain::flows::{AuthFlow, FlowKind};
use cw_core::errors::FlowError;
use cw_shared::config::FlowConfig;

/// Exclusive access to one flow for the length of a submission
pub type FlowGuard = OwnedMutexGuard<AuthFlow>;

/// Kind and step of a flow as last seen outside a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowView {
    pub kind: FlowKind,
    pub step: &'static str,
}

impl From<&AuthFlow> for FlowView {
    fn from(flow: &AuthFlow) -> Self {
        Self {
            kind: flow.kind(),
            step: flow.step_name(),
        }
    }
}

struct FlowEntry {
    flow: Arc<Mutex<AuthFlow>>,
    view: FlowView,
    last_used: Instant,
}

/// Auth flows keyed by the id stored in the `auth_flow` cookie
pub struct FlowStore {
    entries: RwLock<HashMap<Uuid, FlowEntry>>,
    ttl: Duration,
}

impl FlowStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn from_config(config: &FlowConfig) -> Self {
        let minutes = config.ttl_minutes.max(1) as u64;
        Self::new(Duration::from_secs(minutes * 60))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a new flow and return its id; expired flows are swept first
    pub async fn insert(&self, flow: AuthFlow) -> Uuid {
        self.sweep_expired().await;

        let id = Uuid::new_v4();
        let kind = flow.kind();
        let view = FlowView::from(&flow);
        self.entries.write().await.insert(
            id,
            FlowEntry {
                flow: Arc::new(Mutex::new(flow)),
                view,
                last_used: Instant::now(),
            },
        );
        debug!(event = "flow_created", flow_id = %id, kind = %kind);
        id
    }

    /// Take exclusive hold of a flow.
    ///
    /// Fails with `NotFound` for unknown or expired ids and with
    /// `SubmissionInProgress` while another request holds the flow.
    pub async fn checkout(&self, id: Uuid) -> Result<FlowGuard, FlowError> {
        let mut entries = self.entries.write().await;
        let entry = self.live_entry(&mut entries, id)?;

        let guard = entry
            .flow
            .clone()
            .try_lock_owned()
            .map_err(|_| FlowError::SubmissionInProgress)?;
        entry.view = FlowView::from(&*guard);
        entry.last_used = Instant::now();
        Ok(guard)
    }

    /// Current kind and step of a flow without holding it.
    ///
    /// While a submission holds the flow this reports the step it started
    /// from. The idle timer is left alone.
    pub async fn peek(&self, id: Uuid) -> Result<FlowView, FlowError> {
        let mut entries = self.entries.write().await;
        let entry = self.live_entry(&mut entries, id)?;

        if let Ok(flow) = entry.flow.try_lock() {
            entry.view = FlowView::from(&*flow);
        }
        Ok(entry.view)
    }

    fn live_entry<'a>(
        &self,
        entries: &'a mut HashMap<Uuid, FlowEntry>,
        id: Uuid,
    ) -> Result<&'a mut FlowEntry, FlowError> {
        let expired = match entries.get(&id) {
            Some(entry) => entry.last_used.elapsed() > self.ttl,
            None => return Err(FlowError::NotFound),
        };
        if expired {
            entries.remove(&id);
            debug!(event = "flow_expired", flow_id = %id);
            return Err(FlowError::NotFound);
        }
        entries.get_mut(&id).ok_or(FlowError::NotFound)
    }

    /// Drop a flow, e.g. once it reached its last step
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.entries.write().await.remove(&id).is_some();
        if removed {
            debug!(event = "flow_removed", flow_id = %id);
        }
        removed
    }

    /// Remove flows idle for longer than the TTL
    pub async fn sweep_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        let ttl = self.ttl;
        entries.retain(|_, entry| entry.last_used.elapsed() <= ttl);
        let swept = before - entries.len();
        if swept > 0 {
            debug!(event = "flows_swept", count = swept);
        }
        swept
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
