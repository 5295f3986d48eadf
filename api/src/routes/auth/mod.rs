//! Authentication route handlers
//!
//! Flow-bound endpoints locate their flow through the `auth_flow` cookie.
//! Entry endpoints (signup, login code request, forgot password) reuse a
//! stored flow of the same kind or start a fresh one that is only stored
//! once the first step succeeded. Finished flows are dropped together
//! with their cookie.

pub mod login;
pub mod login_code;
pub mod logout;
pub mod password_reset;
pub mod session;
pub mod signup;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder};
use serde::Serialize;
use uuid::Uuid;

use cw_core::domain::flows::{AuthFlow, FlowKind};
use cw_core::errors::FlowError;
use cw_core::services::auth::{AuthService, AuthServiceConfig};
use cw_core::services::backend::AuthBackend;
use cw_core::services::session::{AuthSession, CookieJar, SessionPolicy};
use cw_infra::{FlowGuard, FlowStore};
use cw_shared::config::{AppConfig, AUTH_FLOW_COOKIE};
use cw_shared::ApiResponse;

use crate::cookies::{flow_cookie, flow_id, RequestCookieJar};
use crate::dto::CodeSentResponse;
use crate::handlers::ApiError;
use crate::middleware::RequestIdExt;

/// Application state shared by every handler
pub struct AppState<B>
where
    B: AuthBackend,
{
    pub auth_service: Arc<AuthService<B>>,
    pub flows: Arc<FlowStore>,
    pub session: AuthSession,
    pub config: Arc<AppConfig>,
}

impl<B> AppState<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, flows: Arc<FlowStore>, config: Arc<AppConfig>) -> Self {
        let auth_service = Arc::new(AuthService::new(
            backend,
            AuthServiceConfig::from_flow_config(&config.flow),
        ));
        let session = AuthSession::new(SessionPolicy::from_app_config(&config));

        Self {
            auth_service,
            flows,
            session,
            config,
        }
    }

    pub fn cookie_jar<'a>(&self, req: &'a HttpRequest) -> RequestCookieJar<'a> {
        RequestCookieJar::new(req, self.session.policy())
    }
}

/// A flow held for the duration of one request
pub enum FlowSlot {
    /// Stored flow, locked against concurrent submissions
    Stored { id: Uuid, guard: FlowGuard },
    /// New flow, stored only if its first step succeeds
    Fresh(AuthFlow),
}

impl FlowSlot {
    pub fn flow(&self) -> &AuthFlow {
        match self {
            FlowSlot::Stored { guard, .. } => &**guard,
            FlowSlot::Fresh(flow) => flow,
        }
    }

    pub fn flow_mut(&mut self) -> &mut AuthFlow {
        match self {
            FlowSlot::Stored { guard, .. } => &mut **guard,
            FlowSlot::Fresh(flow) => flow,
        }
    }
}

/// Flow for an entry endpoint: the stored one when it matches `kind`, else a fresh one
pub async fn open_flow<B: AuthBackend>(
    state: &AppState<B>,
    req: &HttpRequest,
    kind: FlowKind,
) -> Result<FlowSlot, ApiError> {
    if let Some(id) = flow_id(req) {
        match state.flows.checkout(id).await {
            Ok(guard) if guard.kind() == kind && !guard.is_finished() => {
                return Ok(FlowSlot::Stored { id, guard });
            }
            Ok(guard) => {
                drop(guard);
                state.flows.remove(id).await;
            }
            Err(FlowError::NotFound) => {}
            Err(err) => return Err(err.into()),
        }
    }
    Ok(FlowSlot::Fresh(AuthFlow::start(kind)))
}

/// The stored flow named by the cookie, which must be of `kind`
pub async fn resume_flow<B: AuthBackend>(
    state: &AppState<B>,
    req: &HttpRequest,
    kind: FlowKind,
) -> Result<FlowSlot, ApiError> {
    let id = flow_id(req).ok_or(FlowError::NotFound)?;
    let guard = state.flows.checkout(id).await?;
    if guard.kind() != kind {
        return Err(FlowError::NotFound.into());
    }
    Ok(FlowSlot::Stored { id, guard })
}

/// Persist the outcome of a successful step.
///
/// Fresh flows are stored and pointed at by a new `auth_flow` cookie;
/// finished flows are removed along with the cookie.
pub async fn commit_flow<B: AuthBackend>(
    state: &AppState<B>,
    slot: FlowSlot,
    jar: &mut RequestCookieJar<'_>,
) {
    match slot {
        FlowSlot::Fresh(flow) => {
            if !flow.is_finished() {
                let id = state.flows.insert(flow).await;
                jar.set(flow_cookie(state.session.policy(), id, state.flows.ttl()));
            }
        }
        FlowSlot::Stored { id, guard } => {
            let finished = guard.is_finished();
            drop(guard);
            if finished {
                state.flows.remove(id).await;
                jar.remove(AUTH_FLOW_COOKIE);
            }
        }
    }
}

/// 200 response carrying `data` and every cookie change of the exchange
pub fn respond<T: Serialize>(
    jar: RequestCookieJar<'_>,
    data: T,
    request_id: String,
) -> HttpResponse {
    let mut response: HttpResponseBuilder = HttpResponse::Ok();
    jar.apply(&mut response);
    response.json(ApiResponse::success(data).with_request_id(request_id))
}

/// Resend the code of the stored flow of `kind`
pub async fn resend_code<B: AuthBackend>(
    req: HttpRequest,
    state: actix_web::web::Data<AppState<B>>,
    kind: FlowKind,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();

    let mut slot = resume_flow(&state, &req, kind).await?;
    let sent = state.auth_service.resend_code(slot.flow_mut()).await?;
    log::info!("[{}] Code resent for {} flow", request_id, kind);

    let data = CodeSentResponse::new(slot.flow(), sent);
    let mut jar = state.cookie_jar(&req);
    commit_flow(&state, slot, &mut jar).await;
    Ok(respond(jar, data, request_id))
}
