//! Session cookie configuration

use serde::{Deserialize, Serialize};

/// Cookie holding the opaque access token
pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// Cookie holding the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Cookie holding the encoded user data
pub const USER_DATA_COOKIE: &str = "user_data";

/// Cookie identifying the in-progress auth flow
pub const AUTH_FLOW_COOKIE: &str = "auth_flow";

/// Lifetimes and attributes of the session cookies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// `auth_token` lifetime in days
    #[serde(default = "default_auth_token_days")]
    pub auth_token_days: i64,

    /// `refresh_token` lifetime in days
    #[serde(default = "default_refresh_token_days")]
    pub refresh_token_days: i64,

    /// `user_data` lifetime in days
    #[serde(default = "default_user_data_days")]
    pub user_data_days: i64,

    /// `SameSite` attribute: `Strict`, `Lax` or `None`
    #[serde(default = "default_same_site")]
    pub same_site: String,

    /// Forces the `Secure` flag on or off; `None` follows the public URL scheme
    #[serde(default)]
    pub secure: Option<bool>,

    /// Cookie domain, host-only when unset
    #[serde(default)]
    pub domain: Option<String>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            auth_token_days: default_auth_token_days(),
            refresh_token_days: default_refresh_token_days(),
            user_data_days: default_user_data_days(),
            same_site: default_same_site(),
            secure: None,
            domain: None,
        }
    }
}

impl CookieConfig {
    /// Resolve the `Secure` flag given whether the gateway is served over HTTPS
    pub fn secure_for(&self, is_https: bool) -> bool {
        self.secure.unwrap_or(is_https)
    }
}

fn default_same_site() -> String {
    "Lax".to_string()
}

fn default_auth_token_days() -> i64 {
    7
}

fn default_refresh_token_days() -> i64 {
    30
}

fn default_user_data_days() -> i64 {
    7
}
