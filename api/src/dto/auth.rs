//! Request and response bodies of the auth endpoints
//!
//! Request fields default to empty so that missing fields reach the
//! "is required" checks of the auth service. The limits below only bound
//! the payload size.

use serde::{Deserialize, Serialize};
use validator::Validate;

use cw_core::domain::entities::{SignupForm, UserData};
use cw_core::domain::flows::{AuthFlow, FlowKind};
use cw_core::domain::value_objects::Redirect;
use cw_core::services::auth::{CodeSent, PasswordResetComplete};
use cw_infra::FlowView;

/// Signup form. Passwords never derive `Debug`.
#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SignupRequest {
    #[validate(length(max = 150))]
    pub first_name: String,

    #[validate(length(max = 150))]
    pub last_name: String,

    #[validate(length(max = 254))]
    pub email: String,

    #[validate(length(max = 128))]
    pub password: String,
}

impl SignupRequest {
    pub fn into_form(self) -> SignupForm {
        SignupForm {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CodeRequest {
    #[validate(length(max = 32))]
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct EmailRequest {
    #[validate(length(max = 254))]
    pub email: String,
}

#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(max = 254))]
    pub email: String,

    #[validate(length(max = 128))]
    pub password: String,
}

#[derive(Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ResetPasswordRequest {
    #[validate(length(max = 32))]
    pub code: String,

    #[validate(length(max = 128))]
    pub password: String,

    #[validate(length(max = 128))]
    pub confirm_password: String,
}

/// Where a flow stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepResponse {
    pub flow: FlowKind,
    pub step: &'static str,
}

impl From<&AuthFlow> for StepResponse {
    fn from(flow: &AuthFlow) -> Self {
        Self {
            flow: flow.kind(),
            step: flow.step_name(),
        }
    }
}

impl From<FlowView> for StepResponse {
    fn from(view: FlowView) -> Self {
        Self {
            flow: view.kind,
            step: view.step,
        }
    }
}

/// A verification code went out
#[derive(Debug, Clone, Serialize)]
pub struct CodeSentResponse {
    pub flow: FlowKind,
    pub step: &'static str,
    /// Address shown in the "code sent to" note
    pub email: String,
    pub resend_after_seconds: i64,
}

impl CodeSentResponse {
    pub fn new(flow: &AuthFlow, sent: CodeSent) -> Self {
        Self {
            flow: flow.kind(),
            step: flow.step_name(),
            email: sent.email,
            resend_after_seconds: sent.resend_after_seconds,
        }
    }
}

/// Signup finished; the client goes to the login page
#[derive(Debug, Clone, Serialize)]
pub struct SignupCompleteResponse {
    pub step: &'static str,
    pub redirect: Redirect,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user: UserData,
    pub redirect: Redirect,
}

#[derive(Debug, Clone, Serialize)]
pub struct PasswordResetResponse {
    pub message: String,
    pub redirect: Redirect,
}

impl From<PasswordResetComplete> for PasswordResetResponse {
    fn from(complete: PasswordResetComplete) -> Self {
        Self {
            message: complete.message,
            redirect: complete.redirect,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}
