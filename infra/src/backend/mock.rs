//! Scripted mock of the GraphQL auth backend
//!
//! Every call is recorded; answers default to success and can be switched
//! to a business rejection or a transport failure per operation.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use cw_core::errors::BackendError;
use cw_core::services::backend::{
    AuthBackend, LoginRequest, LoginResult, PasswordResetRequest, PasswordResetResult,
    RegisterRequest, RegisterResult, SendVerificationEmailRequest, SendVerificationEmailResult,
};

/// One call made against the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    SendVerificationEmail(SendVerificationEmailRequest),
    Register(RegisterRequest),
    Login(LoginRequest),
    PasswordReset(PasswordResetRequest),
}

#[derive(Debug, Clone, Default)]
enum Outcome {
    #[default]
    Succeed,
    Reject(String),
    Fail,
}

#[derive(Debug, Default)]
struct Script {
    send: Outcome,
    register: Outcome,
    login: Outcome,
    password_reset: Outcome,
}

/// Mock auth backend for development and tests
#[derive(Debug, Default)]
pub struct MockAuthBackend {
    calls: Mutex<Vec<RecordedCall>>,
    script: Mutex<Script>,
}

impl MockAuthBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reject_send(&self, message: &str) {
        self.script_mut(|script| script.send = Outcome::Reject(message.to_string()));
    }

    pub fn reject_register(&self, message: &str) {
        self.script_mut(|script| script.register = Outcome::Reject(message.to_string()));
    }

    pub fn reject_login(&self, message: &str) {
        self.script_mut(|script| script.login = Outcome::Reject(message.to_string()));
    }

    /// Make every operation fail at the transport level
    pub fn go_offline(&self) {
        self.script_mut(|script| {
            script.send = Outcome::Fail;
            script.register = Outcome::Fail;
            script.login = Outcome::Fail;
            script.password_reset = Outcome::Fail;
        });
    }

    /// All calls so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    pub fn send_calls(&self) -> Vec<SendVerificationEmailRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::SendVerificationEmail(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn register_calls(&self) -> Vec<RegisterRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Register(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn login_calls(&self) -> Vec<LoginRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::Login(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub fn password_reset_calls(&self) -> Vec<PasswordResetRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                RecordedCall::PasswordReset(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: RecordedCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn outcome(&self, pick: impl Fn(&Script) -> Outcome) -> Outcome {
        self.script.lock().map(|script| pick(&script)).unwrap_or_default()
    }

    fn script_mut(&self, edit: impl FnOnce(&mut Script)) {
        if let Ok(mut script) = self.script.lock() {
            edit(&mut script);
        }
    }
}

fn offline() -> BackendError {
    BackendError::Transport("mock backend is offline".to_string())
}

#[async_trait]
impl AuthBackend for MockAuthBackend {
    async fn send_verification_email(
        &self,
        request: SendVerificationEmailRequest,
    ) -> Result<SendVerificationEmailResult, BackendError> {
        info!(
            "[MOCK] sendVerificationEmail account={} login={}",
            request.is_account_verification, request.is_login_verification
        );
        self.record(RecordedCall::SendVerificationEmail(request));

        match self.outcome(|script| script.send.clone()) {
            Outcome::Succeed => Ok(SendVerificationEmailResult {
                success: Some(true),
                message: Some("Verification email sent".to_string()),
            }),
            Outcome::Reject(message) => Ok(SendVerificationEmailResult {
                success: Some(false),
                message: Some(message),
            }),
            Outcome::Fail => Err(offline()),
        }
    }

    async fn register(&self, request: RegisterRequest) -> Result<RegisterResult, BackendError> {
        self.record(RecordedCall::Register(request));

        match self.outcome(|script| script.register.clone()) {
            Outcome::Succeed => Ok(RegisterResult {
                success: Some(true),
                errors: None,
            }),
            Outcome::Reject(message) => Ok(RegisterResult {
                success: Some(false),
                errors: Some(json!({ "code": [{ "message": message, "code": "invalid" }] })),
            }),
            Outcome::Fail => Err(offline()),
        }
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginResult, BackendError> {
        self.record(RecordedCall::Login(request));

        match self.outcome(|script| script.login.clone()) {
            Outcome::Succeed => Ok(LoginResult {
                success: Some(true),
                errors: None,
                token: Some("mock-access-token".to_string()),
                refresh_token: Some("mock-refresh-token".to_string()),
                refresh_expires_in: None,
            }),
            Outcome::Reject(message) => Ok(LoginResult {
                success: Some(false),
                errors: Some(json!({ "nonFieldErrors": [{ "message": message }] })),
                ..LoginResult::default()
            }),
            Outcome::Fail => Err(offline()),
        }
    }

    async fn password_reset(
        &self,
        request: PasswordResetRequest,
    ) -> Result<PasswordResetResult, BackendError> {
        self.record(RecordedCall::PasswordReset(request));

        match self.outcome(|script| script.password_reset.clone()) {
            Outcome::Succeed => Ok(PasswordResetResult {
                message: Some("Password has been reset successfully".to_string()),
            }),
            Outcome::Reject(message) => Ok(PasswordResetResult {
                message: Some(message),
            }),
            Outcome::Fail => Err(offline()),
        }
    }
}
