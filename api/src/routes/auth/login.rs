use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use cw_core::services::backend::AuthBackend;
use cw_shared::mask_email;

use super::{respond, AppState};
use crate::dto::{LoginRequest, LoginResponse};
use crate::handlers::ApiError;
use crate::middleware::RequestIdExt;

/// Handler for POST /api/v1/auth/login
///
/// Email and password login. Sets `auth_token`, `refresh_token` and
/// `user_data` on success; the client goes home right away.
pub async fn login<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();
    let body = body.into_inner();
    body.validate()?;

    log::info!("[{}] Password login for {}", request_id, mask_email(&body.email));

    let success = state
        .auth_service
        .login_with_password(&body.email, &body.password)
        .await?;

    let mut jar = state.cookie_jar(&req);
    state
        .session
        .establish(&mut jar, &success.tokens, &success.user)?;

    let data = LoginResponse {
        user: success.user,
        redirect: success.redirect,
    };
    Ok(respond(jar, data, request_id))
}
