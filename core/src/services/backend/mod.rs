//! The remote GraphQL backend as seen by the auth flows.

pub mod traits;
pub mod types;

pub use traits::AuthBackend;
pub use types::{
    first_error_message, LoginRequest, LoginResult, PasswordResetRequest, PasswordResetResult,
    RegisterRequest, RegisterResult, SendVerificationEmailRequest, SendVerificationEmailResult,
};
