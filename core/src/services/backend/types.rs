//! Request and result payloads of the backend calls.
//!
//! Field names serialize in camelCase to match the GraphQL variables.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entities::{
    Email, LoginCredentials, RegistrationDraft, VerificationCode, VerificationPurpose,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationEmailRequest {
    pub email: String,
    pub is_account_verification: bool,
    pub is_login_verification: bool,
}

impl SendVerificationEmailRequest {
    pub fn new(email: &Email, purpose: VerificationPurpose) -> Self {
        Self {
            email: email.as_str().to_string(),
            is_account_verification: purpose.is_account_verification(),
            is_login_verification: purpose.is_login_verification(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendVerificationEmailResult {
    pub success: Option<bool>,
    pub message: Option<String>,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub code: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password1: String,
    pub password2: String,
    pub username: String,
}

impl RegisterRequest {
    /// Combine the retained draft with the submitted code
    pub fn from_draft(draft: &RegistrationDraft, code: &VerificationCode) -> Self {
        let password = draft.password().expose().to_string();
        Self {
            code: code.as_str().to_string(),
            email: draft.email().as_str().to_string(),
            first_name: draft.first_name().to_string(),
            last_name: draft.last_name().to_string(),
            password1: password.clone(),
            password2: password,
            username: draft.username().to_string(),
        }
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResult {
    pub success: Option<bool>,
    pub errors: Option<Value>,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: Option<String>,
    pub code: Option<String>,
}

impl From<&LoginCredentials> for LoginRequest {
    fn from(credentials: &LoginCredentials) -> Self {
        Self {
            email: credentials.email.as_str().to_string(),
            password: credentials.password().map(str::to_string),
            code: credentials.code().map(str::to_string),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("has_password", &self.password.is_some())
            .field("has_code", &self.code.is_some())
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub success: Option<bool>,
    pub errors: Option<Value>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
    pub refresh_expires_in: Option<i64>,
}

impl fmt::Debug for LoginResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResult")
            .field("success", &self.success)
            .field("errors", &self.errors)
            .field("has_token", &self.token.is_some())
            .field("refresh_expires_in", &self.refresh_expires_in)
            .finish()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetRequest {
    pub code: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for PasswordResetRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordResetRequest { .. }")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordResetResult {
    pub message: Option<String>,
}

/// First human-readable message in a backend `errors` value.
///
/// Accepts a bare string, an object with a `message` string, or lists and
/// maps of those (field name → list of messages), searched depth-first.
pub fn first_error_message(errors: &Value) -> Option<String> {
    match errors {
        Value::String(message) if !message.trim().is_empty() => Some(message.clone()),
        Value::Array(items) => items.iter().find_map(first_error_message),
        Value::Object(map) => match map.get("message") {
            Some(Value::String(message)) if !message.trim().is_empty() => Some(message.clone()),
            _ => map.values().find_map(first_error_message),
        },
        _ => None,
    }
}
