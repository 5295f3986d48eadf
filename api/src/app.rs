//! Application factory
//!
//! Builds the actix-web application around an `AppState`; `main` and the
//! integration tests share this factory.

use actix_web::{
    error::InternalError, middleware::Logger, web, App, HttpResponse,
};

use cw_core::services::backend::AuthBackend;
use cw_shared::{error_codes, ErrorResponse};

use crate::middleware::{create_cors, RequestIdMiddleware, SecurityMiddleware};
use crate::routes::auth::{
    login::login,
    login_code::{cancel_login_code, request_login_code, resend_login_code, verify_login_code},
    logout::logout,
    password_reset::{forgot_password, reset_password, resend_reset_code},
    session::{current_flow, current_session},
    signup::{resend_signup_code, signup, signup_back, verify_signup},
    AppState,
};
use crate::routes::health::{health_check, not_found};

/// Largest accepted JSON body
const JSON_LIMIT_BYTES: usize = 16 * 1024;

/// Create and configure the application with all dependencies
pub fn create_app<B>(
    app_state: web::Data<AppState<B>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    B: AuthBackend + 'static,
{
    let cors = create_cors(&app_state.config);
    let security = SecurityMiddleware::from_config(&app_state.config);

    let json_config = web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err, _req| {
            let body = ErrorResponse::new(error_codes::BAD_REQUEST, err.to_string());
            InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
        });

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        // The last `wrap` runs first: ids are assigned before CORS and security
        .wrap(Logger::new("%a \"%r\" %s %b %T %{x-request-id}o"))
        .wrap(security)
        .wrap(cors)
        .wrap(RequestIdMiddleware)
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1/auth")
                .route("/signup", web::post().to(signup::<B>))
                .route("/signup/verify", web::post().to(verify_signup::<B>))
                .route("/signup/resend", web::post().to(resend_signup_code::<B>))
                .route("/signup/back", web::post().to(signup_back::<B>))
                .route("/login", web::post().to(login::<B>))
                .route("/login/code", web::post().to(request_login_code::<B>))
                .route("/login/code/verify", web::post().to(verify_login_code::<B>))
                .route("/login/code/resend", web::post().to(resend_login_code::<B>))
                .route("/login/code/cancel", web::post().to(cancel_login_code::<B>))
                .route("/password/forgot", web::post().to(forgot_password::<B>))
                .route("/password/reset", web::post().to(reset_password::<B>))
                .route("/password/resend", web::post().to(resend_reset_code::<B>))
                .route("/logout", web::post().to(logout::<B>))
                .route("/session", web::get().to(current_session::<B>))
                .route("/flow", web::get().to(current_flow::<B>)),
        )
        .default_service(web::route().to(not_found))
}
