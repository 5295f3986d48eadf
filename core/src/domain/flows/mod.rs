//! Typed step machines for each auth branch.
//!
//! A flow is plain state; the auth service performs the backend calls and
//! moves the flow forward only when a call succeeds.

pub mod login_code;
pub mod password_reset;
pub mod signup;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use login_code::LoginCodeStep;
pub use password_reset::PasswordResetStep;
pub use signup::SignupStep;

use crate::domain::entities::Email;
use crate::errors::FlowError;

/// The last code emailed on a flow, remembered after the code step is left
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastCodeSent {
    pub email: Email,
    pub sent_at: DateTime<Utc>,
}

impl LastCodeSent {
    pub fn new(email: Email, sent_at: DateTime<Utc>) -> Self {
        Self { email, sent_at }
    }

    /// Send time, if the code went to `email`
    pub fn sent_at_for(&self, email: &Email) -> Option<DateTime<Utc>> {
        (self.email == *email).then_some(self.sent_at)
    }
}

/// Which branch a flow belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    Signup,
    LoginCode,
    PasswordReset,
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowKind::Signup => "signup",
            FlowKind::LoginCode => "login_code",
            FlowKind::PasswordReset => "password_reset",
        };
        f.write_str(name)
    }
}

/// Any in-progress auth flow
#[derive(Debug, Clone)]
pub enum AuthFlow {
    Signup(SignupStep),
    LoginCode(LoginCodeStep),
    PasswordReset(PasswordResetStep),
}

impl AuthFlow {
    /// A fresh flow at the first step of `kind`
    pub fn start(kind: FlowKind) -> Self {
        match kind {
            FlowKind::Signup => AuthFlow::Signup(SignupStep::default()),
            FlowKind::LoginCode => AuthFlow::LoginCode(LoginCodeStep::default()),
            FlowKind::PasswordReset => AuthFlow::PasswordReset(PasswordResetStep::default()),
        }
    }

    pub fn kind(&self) -> FlowKind {
        match self {
            AuthFlow::Signup(_) => FlowKind::Signup,
            AuthFlow::LoginCode(_) => FlowKind::LoginCode,
            AuthFlow::PasswordReset(_) => FlowKind::PasswordReset,
        }
    }

    pub fn step_name(&self) -> &'static str {
        match self {
            AuthFlow::Signup(step) => step.name(),
            AuthFlow::LoginCode(step) => step.name(),
            AuthFlow::PasswordReset(step) => step.name(),
        }
    }

    /// When the last code went out, if the flow is waiting for one
    pub fn code_sent_at(&self) -> Option<DateTime<Utc>> {
        match self {
            AuthFlow::Signup(step) => step.code_sent_at(),
            AuthFlow::LoginCode(step) => step.code_sent_at(),
            AuthFlow::PasswordReset(step) => step.code_sent_at(),
        }
    }

    /// Whether the flow has reached its last step
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            AuthFlow::Signup(SignupStep::Complete)
                | AuthFlow::LoginCode(LoginCodeStep::Authenticated)
                | AuthFlow::PasswordReset(PasswordResetStep::Done { .. })
        )
    }

    pub fn as_signup_mut(&mut self) -> Result<&mut SignupStep, FlowError> {
        match self {
            AuthFlow::Signup(step) => Ok(step),
            _ => Err(FlowError::NotFound),
        }
    }

    pub fn as_login_code_mut(&mut self) -> Result<&mut LoginCodeStep, FlowError> {
        match self {
            AuthFlow::LoginCode(step) => Ok(step),
            _ => Err(FlowError::NotFound),
        }
    }

    pub fn as_password_reset_mut(&mut self) -> Result<&mut PasswordResetStep, FlowError> {
        match self {
            AuthFlow::PasswordReset(step) => Ok(step),
            _ => Err(FlowError::NotFound),
        }
    }
}
