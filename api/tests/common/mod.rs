//! Shared setup for the API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::web;

use cw_api::routes::auth::AppState;
use cw_infra::backend::MockAuthBackend;
use cw_infra::FlowStore;
use cw_shared::config::AppConfig;

pub type TestState = web::Data<AppState<MockAuthBackend>>;

/// App state over a fresh mock backend with default configuration
pub fn test_state() -> (TestState, Arc<MockAuthBackend>) {
    test_state_with(|_| {})
}

pub fn test_state_with(adjust: impl FnOnce(&mut AppConfig)) -> (TestState, Arc<MockAuthBackend>) {
    let mut config = AppConfig::default();
    adjust(&mut config);

    let backend = Arc::new(MockAuthBackend::new());
    let flows = Arc::new(FlowStore::from_config(&config.flow));
    let state = web::Data::new(AppState::new(backend.clone(), flows, Arc::new(config)));
    (state, backend)
}

/// Cookie set by a response, if any
pub fn response_cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.into_owned())
}

/// Request-side copy of a cookie a response set
pub fn echo(cookie: &Cookie<'static>) -> Cookie<'static> {
    Cookie::new(cookie.name().to_string(), cookie.value().to_string())
}

pub fn signup_body() -> serde_json::Value {
    serde_json::json!({
        "first_name": "Jane",
        "last_name": "Doe",
        "email": "jane.doe@example.com",
        "password": "s3cret!"
    })
}
