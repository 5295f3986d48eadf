//! Opaque tokens issued by the backend on a successful login.

use std::fmt;

/// Access and refresh token pair. Presence of the access token implies authenticated.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    /// Refresh token lifetime reported by the backend, if any
    pub refresh_expires_in: Option<i64>,
}

impl AuthTokens {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            refresh_expires_in: None,
        }
    }

    pub fn with_refresh_expires_in(mut self, seconds: Option<i64>) -> Self {
        self.refresh_expires_in = seconds;
        self
    }
}

impl fmt::Debug for AuthTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthTokens")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .field("refresh_expires_in", &self.refresh_expires_in)
            .finish()
    }
}
