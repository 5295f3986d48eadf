//! Services driving the auth flows: the backend seam, session access and the auth service.

pub mod auth;
pub mod backend;
pub mod session;

// Re-export commonly used types
pub use auth::{AuthService, AuthServiceConfig, CodeSent, LoginSuccess, PasswordResetComplete};
pub use backend::AuthBackend;
pub use session::{
    AuthSession, CookieJar, MemoryCookieJar, SessionCookie, SessionPolicy, SessionSnapshot,
};
