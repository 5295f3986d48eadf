//! Cookie lifetimes and attributes

use std::time::Duration;

use cw_shared::config::{AppConfig, CookieConfig};
use tracing::warn;

use super::jar::{SameSite, SessionCookie};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// How the session cookies are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPolicy {
    pub auth_token_max_age: Duration,
    pub refresh_token_max_age: Duration,
    pub user_data_max_age: Duration,
    pub same_site: SameSite,
    pub secure: bool,
    pub domain: Option<String>,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::from_config(&CookieConfig::default(), false)
    }
}

impl SessionPolicy {
    /// Build the policy from cookie config; `is_https` decides `Secure` unless forced
    pub fn from_config(config: &CookieConfig, is_https: bool) -> Self {
        let same_site = config.same_site.parse().unwrap_or_else(|err| {
            warn!(error = %err, "Falling back to SameSite=Lax");
            SameSite::Lax
        });

        Self {
            auth_token_max_age: days(config.auth_token_days),
            refresh_token_max_age: days(config.refresh_token_days),
            user_data_max_age: days(config.user_data_days),
            same_site,
            secure: config.secure_for(is_https),
            domain: config.domain.clone(),
        }
    }

    pub fn from_app_config(config: &AppConfig) -> Self {
        Self::from_config(&config.cookies, config.server.is_https())
    }

    /// A cookie carrying this policy's attributes
    pub fn cookie(&self, name: &str, value: impl Into<String>, max_age: Duration) -> SessionCookie {
        SessionCookie {
            domain: self.domain.clone(),
            same_site: self.same_site,
            secure: self.secure,
            ..SessionCookie::new(name, value, max_age)
        }
    }
}

fn days(count: i64) -> Duration {
    Duration::from_secs(count.max(0) as u64 * SECONDS_PER_DAY)
}
