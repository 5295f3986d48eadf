//! Establishing, reading and clearing the cookie session

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use cw_shared::config::{AUTH_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_DATA_COOKIE};
use serde::Serialize;
use tracing::{debug, warn};

use super::jar::CookieJar;
use super::policy::SessionPolicy;
use crate::domain::entities::{AuthTokens, UserData};
use crate::errors::{DomainError, DomainResult};

/// What the client can learn about the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub has_refresh_token: bool,
    pub user: Option<UserData>,
}

/// The only place session cookies are read or written
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    policy: SessionPolicy,
}

impl AuthSession {
    pub fn new(policy: SessionPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Write the token pair and user data after a successful login
    pub fn establish(
        &self,
        jar: &mut dyn CookieJar,
        tokens: &AuthTokens,
        user: &UserData,
    ) -> DomainResult<()> {
        let user_data = encode_user_data(user)?;

        jar.set(self.policy.cookie(
            AUTH_TOKEN_COOKIE,
            tokens.access_token.as_str(),
            self.policy.auth_token_max_age,
        ));
        jar.set(self.policy.cookie(
            REFRESH_TOKEN_COOKIE,
            tokens.refresh_token.as_str(),
            self.policy.refresh_token_max_age,
        ));
        jar.set(self.policy.cookie(
            USER_DATA_COOKIE,
            user_data,
            self.policy.user_data_max_age,
        ));

        debug!(event = "session_established", secure = self.policy.secure);
        Ok(())
    }

    /// Remove all session cookies
    pub fn clear(&self, jar: &mut dyn CookieJar) {
        jar.remove(AUTH_TOKEN_COOKIE);
        jar.remove(REFRESH_TOKEN_COOKIE);
        jar.remove(USER_DATA_COOKIE);
        debug!(event = "session_cleared");
    }

    /// The current session, if an access token is present
    pub fn current(&self, jar: &dyn CookieJar) -> Option<SessionSnapshot> {
        jar.get(AUTH_TOKEN_COOKIE).filter(|token| !token.is_empty())?;

        let user = jar
            .get(USER_DATA_COOKIE)
            .and_then(|raw| match decode_user_data(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    warn!(event = "user_data_unreadable", error = %err);
                    None
                }
            });

        Some(SessionSnapshot {
            authenticated: true,
            has_refresh_token: jar.get(REFRESH_TOKEN_COOKIE).is_some(),
            user,
        })
    }

    pub fn access_token(&self, jar: &dyn CookieJar) -> Option<String> {
        jar.get(AUTH_TOKEN_COOKIE).filter(|token| !token.is_empty())
    }
}

/// URL-safe base64 of the JSON user data
pub fn encode_user_data(user: &UserData) -> DomainResult<String> {
    let json = serde_json::to_vec(user).map_err(|err| DomainError::Internal {
        message: format!("Failed to encode user data: {}", err),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

pub fn decode_user_data(raw: &str) -> DomainResult<UserData> {
    let bytes = URL_SAFE_NO_PAD
        .decode(raw.as_bytes())
        .map_err(|err| DomainError::Internal {
            message: format!("user_data is not valid base64: {}", err),
        })?;
    serde_json::from_slice(&bytes).map_err(|err| DomainError::Internal {
        message: format!("user_data is not valid JSON: {}", err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Email;
    use crate::services::session::{MemoryCookieJar, SessionCookie};
    use cw_shared::config::CookieConfig;
    use std::time::Duration;

    fn session() -> AuthSession {
        AuthSession::new(SessionPolicy::from_config(&CookieConfig::default(), true))
    }

    fn user() -> UserData {
        UserData::for_login(&Email::parse("jane@example.com").unwrap())
    }

    #[test]
    fn test_establish_writes_three_cookies() {
        let session = session();
        let mut jar = MemoryCookieJar::new();
        let tokens = AuthTokens::new("access", "refresh");

        session.establish(&mut jar, &tokens, &user()).unwrap();

        assert_eq!(jar.get(AUTH_TOKEN_COOKIE).as_deref(), Some("access"));
        assert_eq!(jar.get(REFRESH_TOKEN_COOKIE).as_deref(), Some("refresh"));
        assert!(jar.contains(USER_DATA_COOKIE));

        let auth = jar.cookie(AUTH_TOKEN_COOKIE).unwrap();
        assert!(auth.secure);
        assert_eq!(auth.max_age, Duration::from_secs(7 * 86_400));
        let refresh = jar.cookie(REFRESH_TOKEN_COOKIE).unwrap();
        assert_eq!(refresh.max_age, Duration::from_secs(30 * 86_400));
    }

    #[test]
    fn test_current_reads_back_user() {
        let session = session();
        let mut jar = MemoryCookieJar::new();
        assert!(session.current(&jar).is_none());

        let user = user();
        session
            .establish(&mut jar, &AuthTokens::new("access", "refresh"), &user)
            .unwrap();

        let snapshot = session.current(&jar).unwrap();
        assert!(snapshot.authenticated);
        assert!(snapshot.has_refresh_token);
        assert_eq!(snapshot.user, Some(user));
        assert_eq!(session.access_token(&jar).as_deref(), Some("access"));
    }

    #[test]
    fn test_clear_removes_session() {
        let session = session();
        let mut jar = MemoryCookieJar::new();
        session
            .establish(&mut jar, &AuthTokens::new("access", "refresh"), &user())
            .unwrap();

        session.clear(&mut jar);
        assert!(jar.is_empty());
        assert!(session.current(&jar).is_none());
    }

    #[test]
    fn test_garbled_user_data_is_ignored() {
        let session = session();
        let mut jar = MemoryCookieJar::new();
        jar.set(SessionCookie::new(AUTH_TOKEN_COOKIE, "access", Duration::from_secs(60)));
        jar.set(SessionCookie::new(USER_DATA_COOKIE, "%%%", Duration::from_secs(60)));

        let snapshot = session.current(&jar).unwrap();
        assert!(snapshot.user.is_none());
        assert!(!snapshot.has_refresh_token);
    }

    #[test]
    fn test_user_data_encoding_is_url_safe() {
        let encoded = encode_user_data(&user()).unwrap();
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+'));
        assert_eq!(decode_user_data(&encoded).unwrap(), user());
    }
}
