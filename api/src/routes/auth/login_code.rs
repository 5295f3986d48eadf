//! Login with an emailed code instead of a password

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cw_core::domain::flows::FlowKind;
use cw_core::services::backend::AuthBackend;
use cw_shared::mask_email;

use super::{commit_flow, open_flow, respond, resume_flow, AppState};
use crate::dto::{CodeRequest, CodeSentResponse, EmailRequest, LoginResponse, StepResponse};
use crate::handlers::ApiError;
use crate::middleware::RequestIdExt;

/// Handler for POST /api/v1/auth/login/code
///
/// Emails a login code and opens the code entry step. Asking again for
/// the same address is subject to the resend cooldown; a different
/// address replaces the pending one.
pub async fn request_login_code<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<EmailRequest>,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();
    let body = body.into_inner();
    body.validate()?;

    log::info!("[{}] Login code requested for {}", request_id, mask_email(&body.email));

    let mut slot = open_flow(&state, &req, FlowKind::LoginCode).await?;
    let step = slot.flow_mut().as_login_code_mut()?;
    let sent = state.auth_service.request_login_code(step, &body.email).await?;

    let data = CodeSentResponse::new(slot.flow(), sent);
    let mut jar = state.cookie_jar(&req);
    commit_flow(&state, slot, &mut jar).await;
    Ok(respond(jar, data, request_id))
}

/// Handler for POST /api/v1/auth/login/code/verify
///
/// Logs in with the emailed code. The redirect home is delayed so the
/// client can show its success message first.
pub async fn verify_login_code<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<CodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();
    let body = body.into_inner();
    body.validate()?;

    let mut slot = resume_flow(&state, &req, FlowKind::LoginCode).await?;
    let step = slot.flow_mut().as_login_code_mut()?;
    let success = state.auth_service.submit_login_code(step, &body.code).await?;

    let mut jar = state.cookie_jar(&req);
    state
        .session
        .establish(&mut jar, &success.tokens, &success.user)?;
    commit_flow(&state, slot, &mut jar).await;

    log::info!("[{}] Login with code succeeded", request_id);

    let data = LoginResponse {
        user: success.user,
        redirect: success.redirect,
    };
    Ok(respond(jar, data, request_id))
}

/// Handler for POST /api/v1/auth/login/code/resend
pub async fn resend_login_code<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
) -> Result<HttpResponse, ApiError> {
    super::resend_code(req, state, FlowKind::LoginCode).await
}

/// Handler for POST /api/v1/auth/login/code/cancel
///
/// Closes the code overlay; the flow goes back to email entry.
pub async fn cancel_login_code<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();

    let mut slot = resume_flow(&state, &req, FlowKind::LoginCode).await?;
    state
        .auth_service
        .cancel_login_code(slot.flow_mut().as_login_code_mut()?)?;

    let data = StepResponse::from(slot.flow());
    let mut jar = state.cookie_jar(&req);
    commit_flow(&state, slot, &mut jar).await;
    Ok(respond(jar, data, request_id))
}
