//! Configuration for the authentication service

use std::time::Duration;

use cw_shared::config::FlowConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Seconds before another code can be requested for the same flow
    pub resend_cooldown_seconds: i64,
    /// Delay before the client leaves the page after a code login or reset
    pub redirect_delay: Duration,
    /// Minimum length of a new password, in characters
    pub password_min_length: usize,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self::from_flow_config(&FlowConfig::default())
    }
}

impl AuthServiceConfig {
    pub fn from_flow_config(flow: &FlowConfig) -> Self {
        Self {
            resend_cooldown_seconds: flow.resend_cooldown_seconds,
            redirect_delay: Duration::from_millis(flow.redirect_delay_ms),
            password_min_length: flow.password_min_length,
        }
    }
}
