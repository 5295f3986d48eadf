//! Signup: form, emailed code, registration

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cw_core::domain::flows::FlowKind;
use cw_core::services::backend::AuthBackend;
use cw_shared::mask_email;

use super::{commit_flow, open_flow, respond, resume_flow, AppState};
use crate::dto::{
    CodeRequest, CodeSentResponse, SignupCompleteResponse, SignupRequest, StepResponse,
};
use crate::handlers::ApiError;
use crate::middleware::RequestIdExt;

/// Handler for POST /api/v1/auth/signup
///
/// Validates the form, emails an account verification code and moves the
/// flow to `verification_pending`. The form values are held server-side
/// until the code is confirmed.
pub async fn signup<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();
    let body = body.into_inner();
    body.validate()?;

    log::info!("[{}] Signup submitted for {}", request_id, mask_email(&body.email));

    let mut slot = open_flow(&state, &req, FlowKind::Signup).await?;
    let step = slot.flow_mut().as_signup_mut()?;
    let sent = state.auth_service.submit_signup(step, body.into_form()).await?;

    let data = CodeSentResponse::new(slot.flow(), sent);
    let mut jar = state.cookie_jar(&req);
    commit_flow(&state, slot, &mut jar).await;
    Ok(respond(jar, data, request_id))
}

/// Handler for POST /api/v1/auth/signup/verify
///
/// Registers the held form values together with the code. On success the
/// flow is finished and the client is sent to the login page; on failure
/// the flow stays put so the code can be corrected.
pub async fn verify_signup<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<CodeRequest>,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();
    let body = body.into_inner();
    body.validate()?;

    let mut slot = resume_flow(&state, &req, FlowKind::Signup).await?;
    let step = slot.flow_mut().as_signup_mut()?;
    let redirect = state.auth_service.submit_signup_code(step, &body.code).await?;

    log::info!("[{}] Signup completed", request_id);

    let data = SignupCompleteResponse {
        step: slot.flow().step_name(),
        redirect,
    };
    let mut jar = state.cookie_jar(&req);
    commit_flow(&state, slot, &mut jar).await;
    Ok(respond(jar, data, request_id))
}

/// Handler for POST /api/v1/auth/signup/resend
pub async fn resend_signup_code<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
) -> Result<HttpResponse, ApiError> {
    super::resend_code(req, state, FlowKind::Signup).await
}

/// Handler for POST /api/v1/auth/signup/back
///
/// Returns to the form and forgets the held values.
pub async fn signup_back<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();

    let mut slot = resume_flow(&state, &req, FlowKind::Signup).await?;
    state
        .auth_service
        .signup_back(slot.flow_mut().as_signup_mut()?)?;

    let data = StepResponse::from(slot.flow());
    let mut jar = state.cookie_jar(&req);
    commit_flow(&state, slot, &mut jar).await;
    Ok(respond(jar, data, request_id))
}
