//! Auth flow timing and validation settings

use serde::{Deserialize, Serialize};

/// Settings shared by the signup, login-with-code and password reset flows
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FlowConfig {
    /// Idle minutes before an unfinished flow is discarded
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: i64,

    /// Seconds the client must wait before a code can be re-sent
    #[serde(default = "default_resend_cooldown_seconds")]
    pub resend_cooldown_seconds: i64,

    /// Delay before the client navigates away after a code login
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,

    /// Minimum accepted length of a new password
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
            resend_cooldown_seconds: default_resend_cooldown_seconds(),
            redirect_delay_ms: default_redirect_delay_ms(),
            password_min_length: default_password_min_length(),
        }
    }
}

fn default_ttl_minutes() -> i64 {
    30
}

fn default_resend_cooldown_seconds() -> i64 {
    60
}

fn default_redirect_delay_ms() -> u64 {
    2000
}

fn default_password_min_length() -> usize {
    6
}
