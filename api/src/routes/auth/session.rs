//! Read-only views of the session and the current flow

use actix_web::{web, HttpRequest, HttpResponse};

use cw_core::errors::FlowError;
use cw_core::services::backend::AuthBackend;
use cw_shared::{error_codes, ApiResponse, ErrorResponse};

use super::AppState;
use crate::cookies::flow_id;
use crate::dto::StepResponse;
use crate::handlers::ApiError;
use crate::middleware::RequestIdExt;

/// Handler for GET /api/v1/auth/session
///
/// Authenticated means an `auth_token` cookie is present. Unreadable
/// `user_data` is reported as absent rather than failing the request.
pub async fn current_session<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
) -> HttpResponse {
    let request_id = req.request_id();
    let jar = state.cookie_jar(&req);

    match state.session.current(&jar) {
        Some(snapshot) => {
            HttpResponse::Ok().json(ApiResponse::success(snapshot).with_request_id(request_id))
        }
        None => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::UNAUTHENTICATED,
            "Not logged in",
        )),
    }
}

/// Handler for GET /api/v1/auth/flow
///
/// Lets the client restore the right form after a reload. Answers even
/// while a submission on the flow is in progress and does not keep the
/// flow alive.
pub async fn current_flow<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();

    let id = flow_id(&req).ok_or(FlowError::NotFound)?;
    let data = StepResponse::from(state.flows.peek(id).await?);

    Ok(HttpResponse::Ok().json(ApiResponse::success(data).with_request_id(request_id)))
}
