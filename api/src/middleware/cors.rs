//! CORS middleware configuration for the web client.
//!
//! Session cookies only travel cross-origin with credentials, so every
//! configuration here supports credentials. Development without configured
//! origins mirrors any origin; otherwise only the configured origins pass.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use cw_shared::config::AppConfig;

use super::request_id::REQUEST_ID_HEADER;

/// Creates the CORS middleware for the loaded configuration
pub fn create_cors(config: &AppConfig) -> Cors {
    let origins = &config.cors.allowed_origins;

    let mut cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            header::HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers(vec![
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            header::RETRY_AFTER,
        ])
        .max_age(config.cors.max_age)
        .supports_credentials();

    if origins.is_empty() && config.environment.is_development() {
        log::info!("Configuring permissive CORS for development");
        return cors.allow_any_origin();
    }

    for origin in origins.iter().map(|origin| origin.trim()) {
        if !origin.is_empty() {
            log::info!("Adding allowed origin: {}", origin);
            cors = cors.allowed_origin(origin);
        }
    }
    cors
}
