//! Trait for the remote auth backend

use async_trait::async_trait;

use super::types::{
    LoginRequest, LoginResult, PasswordResetRequest, PasswordResetResult, RegisterRequest,
    RegisterResult, SendVerificationEmailRequest, SendVerificationEmailResult,
};
use crate::errors::BackendError;

/// The four calls the auth flows make.
///
/// An `Err` means the call itself failed (network, GraphQL errors, unusable
/// payload). A business rejection is an `Ok` result with `success: false`.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Email a one-time code
    async fn send_verification_email(
        &self,
        request: SendVerificationEmailRequest,
    ) -> Result<SendVerificationEmailResult, BackendError>;

    /// Create the account from a verified draft
    async fn register(&self, request: RegisterRequest) -> Result<RegisterResult, BackendError>;

    /// Exchange a password or code for a token pair
    async fn login(&self, request: LoginRequest) -> Result<LoginResult, BackendError>;

    /// Set a new password with an emailed code
    async fn password_reset(
        &self,
        request: PasswordResetRequest,
    ) -> Result<PasswordResetResult, BackendError>;
}
