//! Main authentication service implementation

use std::sync::Arc;

use chrono::{DateTime, Utc};
use cw_shared::mask_email;
use tracing::{info, warn};

use crate::domain::entities::{
    AuthTokens, Email, LoginCredentials, Password, RegistrationDraft, SignupForm, UserData,
    VerificationCode, VerificationPurpose,
};
use crate::domain::flows::{AuthFlow, LoginCodeStep, PasswordResetStep, SignupStep};
use crate::domain::value_objects::{Redirect, Route};
use crate::errors::{
    AuthError, BackendError, DomainError, DomainResult, FlowError, ValidationError,
};
use crate::services::backend::{
    first_error_message, AuthBackend, LoginRequest, PasswordResetRequest, RegisterRequest,
    SendVerificationEmailRequest,
};

use super::config::AuthServiceConfig;
use super::types::{CodeSent, LoginSuccess, PasswordResetComplete};

const SEND_CODE_FAILED: &str = "Failed to send verification code";
const REGISTRATION_FAILED: &str = "Registration failed";
const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

/// Authentication service driving every auth flow against one backend
pub struct AuthService<B>
where
    B: AuthBackend,
{
    /// Remote GraphQL backend
    backend: Arc<B>,
    /// Service configuration
    config: AuthServiceConfig,
}

impl<B> AuthService<B>
where
    B: AuthBackend,
{
    pub fn new(backend: Arc<B>, config: AuthServiceConfig) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &AuthServiceConfig {
        &self.config
    }

    /// Submit the signup form and email an account verification code.
    ///
    /// The step only advances when the backend reports success; on any
    /// failure it stays on the form.
    pub async fn submit_signup(
        &self,
        step: &mut SignupStep,
        form: SignupForm,
    ) -> DomainResult<CodeSent> {
        step.ensure_credentials_entry()?;
        let draft = RegistrationDraft::from_form(form)?;
        if let Some(sent_at) = step.last_sent_to(draft.email()) {
            self.ensure_cooldown_elapsed(sent_at)?;
        }

        self.send_code(draft.email(), VerificationPurpose::AccountVerification)
            .await?;

        let email = draft.email().as_str().to_string();
        step.verification_sent(draft, Utc::now())?;

        Ok(self.code_sent(email))
    }

    /// Submit the emailed code together with the retained draft.
    ///
    /// Failure leaves the draft in place so the code can be resubmitted.
    pub async fn submit_signup_code(
        &self,
        step: &mut SignupStep,
        code: &str,
    ) -> DomainResult<Redirect> {
        let draft = step.draft("verify the code")?;
        let code = VerificationCode::parse(code)?;
        let request = RegisterRequest::from_draft(draft, &code);
        let masked = mask_email(&request.email);

        let result = self
            .backend
            .register(request)
            .await
            .map_err(|err| transport_failure("register", err))?;

        if result.success != Some(true) {
            let message = result
                .errors
                .as_ref()
                .and_then(first_error_message)
                .unwrap_or_else(|| REGISTRATION_FAILED.to_string());
            warn!(event = "registration_rejected", email = %masked, reason = %message);
            return Err(AuthError::Rejected { message }.into());
        }

        step.complete()?;
        info!(event = "registration_completed", email = %masked);
        Ok(Redirect::immediate(Route::Login))
    }

    /// Return from the code step to the form, discarding the draft
    pub fn signup_back(&self, step: &mut SignupStep) -> DomainResult<()> {
        step.back()?;
        Ok(())
    }

    /// Re-send the code for whichever flow is waiting on one
    pub async fn resend_code(&self, flow: &mut AuthFlow) -> DomainResult<CodeSent> {
        let sent_at = flow.code_sent_at().ok_or(FlowError::InvalidStep {
            operation: "resend the code",
            step: flow.step_name(),
        })?;
        self.ensure_cooldown_elapsed(sent_at)?;

        let (email, purpose) = match flow {
            AuthFlow::Signup(step) => (
                step.draft("resend the code")?.email().clone(),
                VerificationPurpose::AccountVerification,
            ),
            AuthFlow::LoginCode(step) => (
                step.email("resend the code")?.clone(),
                VerificationPurpose::LoginVerification,
            ),
            AuthFlow::PasswordReset(step) => (
                step.email("resend the code")?.clone(),
                VerificationPurpose::PasswordReset,
            ),
        };

        self.send_code(&email, purpose).await?;

        let now = Utc::now();
        match flow {
            AuthFlow::Signup(step) => step.code_resent(now)?,
            AuthFlow::LoginCode(step) => step.code_sent(email.clone(), now)?,
            AuthFlow::PasswordReset(step) => step.code_sent(email.clone(), now)?,
        }

        Ok(self.code_sent(email.as_str().to_string()))
    }

    /// Plain email and password login
    pub async fn login_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> DomainResult<LoginSuccess> {
        let email = Email::parse(email)?;
        let password = Password::new(password);
        if password.is_blank() {
            return Err(ValidationError::required("password").into());
        }

        self.login(
            LoginCredentials::with_password(email, password),
            Redirect::immediate(Route::Home),
        )
        .await
    }

    /// Email a login code and open the code overlay
    pub async fn request_login_code(
        &self,
        step: &mut LoginCodeStep,
        email: &str,
    ) -> DomainResult<CodeSent> {
        step.ensure_can_request()?;
        let email = Email::parse(email)?;
        if let Some(sent_at) = step.last_sent_to(&email) {
            self.ensure_cooldown_elapsed(sent_at)?;
        }

        self.send_code(&email, VerificationPurpose::LoginVerification)
            .await?;
        step.code_sent(email.clone(), Utc::now())?;

        Ok(self.code_sent(email.as_str().to_string()))
    }

    /// Log in with the emailed code; no password is sent
    pub async fn submit_login_code(
        &self,
        step: &mut LoginCodeStep,
        code: &str,
    ) -> DomainResult<LoginSuccess> {
        let email = step.email("verify the login code")?.clone();
        let code = VerificationCode::parse(code)?;

        let success = self
            .login(
                LoginCredentials::with_code(email, code),
                Redirect::after(Route::Home, self.config.redirect_delay),
            )
            .await?;

        step.authenticated()?;
        Ok(success)
    }

    /// Close the code overlay
    pub fn cancel_login_code(&self, step: &mut LoginCodeStep) -> DomainResult<()> {
        step.cancel()?;
        Ok(())
    }

    /// Email a password reset code
    pub async fn request_password_reset(
        &self,
        step: &mut PasswordResetStep,
        email: &str,
    ) -> DomainResult<CodeSent> {
        step.ensure_can_request()?;
        let email = Email::parse(email)?;
        if let PasswordResetStep::CodeEntry {
            email: current,
            code_sent_at,
        } = step
        {
            if *current == email {
                self.ensure_cooldown_elapsed(*code_sent_at)?;
            }
        }

        self.send_code(&email, VerificationPurpose::PasswordReset)
            .await?;
        step.code_sent(email.clone(), Utc::now())?;

        Ok(self.code_sent(email.as_str().to_string()))
    }

    /// Set a new password with the emailed code.
    ///
    /// Checked locally in order before any call: code format, password
    /// length, confirmation match.
    pub async fn submit_password_reset(
        &self,
        step: &mut PasswordResetStep,
        code: &str,
        password: &str,
        confirm_password: &str,
    ) -> DomainResult<PasswordResetComplete> {
        let masked = mask_email(step.email("reset the password")?.as_str());
        let code = VerificationCode::parse(code)?;

        let password = Password::new(password);
        if password.char_len() < self.config.password_min_length {
            return Err(ValidationError::PasswordTooShort {
                min: self.config.password_min_length,
            }
            .into());
        }
        if password.expose() != confirm_password {
            return Err(ValidationError::PasswordMismatch.into());
        }

        let request = PasswordResetRequest {
            code: code.as_str().to_string(),
            password: password.expose().to_string(),
            confirm_password: confirm_password.to_string(),
        };
        let result = self
            .backend
            .password_reset(request)
            .await
            .map_err(|err| transport_failure("passwordReset", err))?;

        let message = result
            .message
            .filter(|message| !message.trim().is_empty())
            .ok_or_else(|| {
                transport_failure(
                    "passwordReset",
                    BackendError::Malformed("response carried no message".to_string()),
                )
            })?;

        step.done(message.clone())?;
        info!(event = "password_reset_completed", email = %masked);

        Ok(PasswordResetComplete {
            message,
            redirect: Redirect::after(Route::Login, self.config.redirect_delay),
        })
    }

    async fn send_code(&self, email: &Email, purpose: VerificationPurpose) -> DomainResult<()> {
        let masked = mask_email(email.as_str());
        let result = self
            .backend
            .send_verification_email(SendVerificationEmailRequest::new(email, purpose))
            .await
            .map_err(|err| transport_failure("sendVerificationEmail", err))?;

        if result.success != Some(true) {
            let message = result
                .message
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| SEND_CODE_FAILED.to_string());
            warn!(
                event = "verification_email_rejected",
                email = %masked,
                purpose = ?purpose,
                reason = %message
            );
            return Err(AuthError::Rejected { message }.into());
        }

        info!(event = "verification_email_sent", email = %masked, purpose = ?purpose);
        Ok(())
    }

    async fn login(
        &self,
        credentials: LoginCredentials,
        redirect: Redirect,
    ) -> DomainResult<LoginSuccess> {
        let masked = mask_email(credentials.email.as_str());
        let with_code = credentials.code().is_some();

        let result = self
            .backend
            .login(LoginRequest::from(&credentials))
            .await
            .map_err(|err| transport_failure("login", err))?;

        if result.success != Some(true) {
            let message = result
                .errors
                .as_ref()
                .and_then(first_error_message)
                .unwrap_or_else(|| LOGIN_FAILED.to_string());
            warn!(event = "login_rejected", email = %masked, with_code, reason = %message);
            return Err(AuthError::Rejected { message }.into());
        }

        let (access_token, refresh_token) = match (result.token, result.refresh_token) {
            (Some(access), Some(refresh)) if !access.is_empty() && !refresh.is_empty() => {
                (access, refresh)
            }
            _ => {
                return Err(transport_failure(
                    "login",
                    BackendError::Malformed("success without a token pair".to_string()),
                ))
            }
        };

        info!(event = "login_succeeded", email = %masked, with_code);
        Ok(LoginSuccess {
            tokens: AuthTokens::new(access_token, refresh_token)
                .with_refresh_expires_in(result.refresh_expires_in),
            user: UserData::for_login(&credentials.email),
            redirect,
        })
    }

    fn ensure_cooldown_elapsed(&self, sent_at: DateTime<Utc>) -> Result<(), FlowError> {
        let elapsed = (Utc::now() - sent_at).num_seconds();
        let remaining = self.config.resend_cooldown_seconds - elapsed;
        if remaining > 0 {
            return Err(FlowError::ResendTooSoon {
                retry_after_seconds: remaining,
            });
        }
        Ok(())
    }

    fn code_sent(&self, email: String) -> CodeSent {
        CodeSent {
            email,
            resend_after_seconds: self.config.resend_cooldown_seconds,
        }
    }
}

fn transport_failure(operation: &'static str, err: BackendError) -> DomainError {
    warn!(event = "backend_call_failed", operation, error = %err);
    AuthError::from(err).into()
}
