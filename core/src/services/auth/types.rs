//! Outcomes of the auth service operations

use serde::Serialize;

use crate::domain::entities::{AuthTokens, UserData};
use crate::domain::value_objects::Redirect;

/// A code went out; the client shows the address and a resend countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSent {
    pub email: String,
    pub resend_after_seconds: i64,
}

/// Tokens to persist plus where to go next
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub tokens: AuthTokens,
    pub user: UserData,
    pub redirect: Redirect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordResetComplete {
    pub message: String,
    pub redirect: Redirect,
}
