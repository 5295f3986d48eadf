//! `AuthBackend` over the GraphQL API

use async_trait::async_trait;
use serde::Deserialize;
use tracing::instrument;

use cw_core::errors::BackendError;
use cw_core::services::backend::{
    AuthBackend, LoginRequest, LoginResult, PasswordResetRequest, PasswordResetResult,
    RegisterRequest, RegisterResult, SendVerificationEmailRequest, SendVerificationEmailResult,
};

use super::client::GraphqlClient;
use super::documents;
use crate::InfrastructureError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SendVerificationEmailData {
    send_verification_email: Option<SendVerificationEmailResult>,
}

#[derive(Debug, Deserialize)]
struct RegisterData {
    register: Option<RegisterResult>,
}

#[derive(Deserialize)]
struct LoginData {
    login: Option<LoginResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PasswordResetData {
    password_reset: Option<PasswordResetResult>,
}

/// Auth backend talking to the community GraphQL API
#[derive(Debug, Clone)]
pub struct GraphqlAuthBackend {
    client: GraphqlClient,
}

impl GraphqlAuthBackend {
    pub fn new(client: GraphqlClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &GraphqlClient {
        &self.client
    }
}

fn missing(field: &str) -> BackendError {
    InfrastructureError::Malformed(format!("{} payload was null", field)).into()
}

#[async_trait]
impl AuthBackend for GraphqlAuthBackend {
    #[instrument(skip_all)]
    async fn send_verification_email(
        &self,
        request: SendVerificationEmailRequest,
    ) -> Result<SendVerificationEmailResult, BackendError> {
        let data: SendVerificationEmailData = self
            .client
            .execute("SendVerificationEmail", documents::SEND_VERIFICATION_EMAIL, request)
            .await?;
        data.send_verification_email
            .ok_or_else(|| missing("sendVerificationEmail"))
    }

    #[instrument(skip_all)]
    async fn register(&self, request: RegisterRequest) -> Result<RegisterResult, BackendError> {
        let data: RegisterData = self
            .client
            .execute("Register", documents::REGISTER, request)
            .await?;
        data.register.ok_or_else(|| missing("register"))
    }

    #[instrument(skip_all)]
    async fn login(&self, request: LoginRequest) -> Result<LoginResult, BackendError> {
        let data: LoginData = self
            .client
            .execute("Login", documents::LOGIN, request)
            .await?;
        data.login.ok_or_else(|| missing("login"))
    }

    #[instrument(skip_all)]
    async fn password_reset(
        &self,
        request: PasswordResetRequest,
    ) -> Result<PasswordResetResult, BackendError> {
        let data: PasswordResetData = self
            .client
            .execute("PasswordReset", documents::PASSWORD_RESET, request)
            .await?;
        data.password_reset.ok_or_else(|| missing("passwordReset"))
    }
}
