//! Forgot password: emailed code, then a new password

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cw_core::domain::flows::FlowKind;
use cw_core::services::backend::AuthBackend;
use cw_shared::mask_email;

use super::{commit_flow, open_flow, respond, resume_flow, AppState};
use crate::dto::{CodeSentResponse, EmailRequest, PasswordResetResponse, ResetPasswordRequest};
use crate::handlers::ApiError;
use crate::middleware::RequestIdExt;

/// Handler for POST /api/v1/auth/password/forgot
pub async fn forgot_password<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();
    let body = body.into_inner();
    body.validate()?;

    log::info!("[{}] Password reset requested for {}", request_id, mask_email(&body.email));

    let mut slot = open_flow(&state, &req, FlowKind::PasswordReset).await?;
    let step = slot.flow_mut().as_password_reset_mut()?;
    let sent = state
        .auth_service
        .request_password_reset(step, &body.email)
        .await?;

    let data = CodeSentResponse::new(slot.flow(), sent);
    let mut jar = state.cookie_jar(&req);
    commit_flow(&state, slot, &mut jar).await;
    Ok(respond(jar, data, request_id))
}

/// Handler for POST /api/v1/auth/password/reset
///
/// Code format, password length and confirmation are checked before the
/// backend is called. The backend's message is returned with a delayed
/// redirect to the login page.
pub async fn reset_password<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();
    let body = body.into_inner();
    body.validate()?;

    let mut slot = resume_flow(&state, &req, FlowKind::PasswordReset).await?;
    let step = slot.flow_mut().as_password_reset_mut()?;
    let complete = state
        .auth_service
        .submit_password_reset(step, &body.code, &body.password, &body.confirm_password)
        .await?;

    log::info!("[{}] Password reset completed", request_id);

    let mut jar = state.cookie_jar(&req);
    commit_flow(&state, slot, &mut jar).await;
    Ok(respond(jar, PasswordResetResponse::from(complete), request_id))
}

/// Handler for POST /api/v1/auth/password/resend
pub async fn resend_reset_code<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
) -> Result<HttpResponse, ApiError> {
    super::resend_code(req, state, FlowKind::PasswordReset).await
}
