use actix_web::{web, HttpRequest, HttpResponse};

use cw_core::services::backend::AuthBackend;
use cw_core::services::session::CookieJar;
use cw_shared::config::AUTH_FLOW_COOKIE;

use super::{respond, AppState};
use crate::cookies::flow_id;
use crate::dto::LogoutResponse;
use crate::handlers::ApiError;
use crate::middleware::RequestIdExt;

/// Handler for POST /api/v1/auth/logout
///
/// Clears the session cookies and any in-progress flow. Succeeds whether
/// or not a session was present.
pub async fn logout<B: AuthBackend + 'static>(
    req: HttpRequest,
    state: web::Data<AppState<B>>,
) -> Result<HttpResponse, ApiError> {
    let request_id = req.request_id();
    let mut jar = state.cookie_jar(&req);

    let had_session = state.session.access_token(&jar).is_some();
    state.session.clear(&mut jar);

    if let Some(id) = flow_id(&req) {
        state.flows.remove(id).await;
        jar.remove(AUTH_FLOW_COOKIE);
    }

    log::info!("[{}] Logout (session present: {})", request_id, had_session);

    let data = LogoutResponse {
        message: "Logged out".to_string(),
    };
    Ok(respond(jar, data, request_id))
}
