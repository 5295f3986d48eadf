//! Integration tests for session inspection and logout

mod common;

use actix_web::cookie::Cookie;
use actix_web::{http::StatusCode, test};
use cw_api::app::create_app;
use cw_shared::config::{
    AUTH_FLOW_COOKIE, AUTH_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_DATA_COOKIE,
};

use common::{echo, response_cookie, test_state};

#[actix_web::test]
async fn test_session_requires_auth_token() {
    let (state, _backend) = test_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/api/v1/auth/session").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHENTICATED");
}

#[actix_web::test]
async fn test_session_after_login() {
    let (state, _backend) = test_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "email": "jane@example.com", "password": "hunter22" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookies: Vec<Cookie<'static>> = [AUTH_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_DATA_COOKIE]
        .iter()
        .map(|name| echo(&response_cookie(&resp, name).unwrap()))
        .collect();

    let mut req = test::TestRequest::get().uri("/api/v1/auth/session");
    for cookie in cookies {
        req = req.cookie(cookie);
    }
    let body: serde_json::Value = test::call_and_read_body_json(&app, req.to_request()).await;

    assert_eq!(body["data"]["authenticated"], true);
    assert_eq!(body["data"]["has_refresh_token"], true);
    assert_eq!(body["data"]["user"]["email"], "jane@example.com");
}

#[actix_web::test]
async fn test_garbled_user_data_is_ignored() {
    let (state, _backend) = test_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/session")
        .cookie(Cookie::new(AUTH_TOKEN_COOKIE, "token"))
        .cookie(Cookie::new(USER_DATA_COOKIE, "not-base64!"))
        .to_request();
    let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["authenticated"], true);
    assert!(body["data"]["user"].is_null());
}

#[actix_web::test]
async fn test_logout_removes_every_cookie() {
    let (state, _backend) = test_state();
    let app = test::init_service(create_app(state)).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login/code")
            .set_json(serde_json::json!({ "email": "jane@example.com" }))
            .to_request(),
    )
    .await;
    let flow_cookie = response_cookie(&resp, AUTH_FLOW_COOKIE).unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .cookie(Cookie::new(AUTH_TOKEN_COOKIE, "token"))
        .cookie(echo(&flow_cookie))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    for name in [AUTH_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_DATA_COOKIE, AUTH_FLOW_COOKIE] {
        let removal = response_cookie(&resp, name).unwrap();
        assert_eq!(removal.value(), "");
        assert_eq!(removal.max_age().map(|age| age.whole_seconds()), Some(0));
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/flow")
        .cookie(echo(&flow_cookie))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_health_and_unknown_routes() {
    let (state, _backend) = test_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let req = test::TestRequest::get().uri("/nowhere").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_flow_is_readable_during_a_submission() {
    let (state, _backend) = test_state();
    let app = test::init_service(create_app(state.clone())).await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/auth/password/forgot")
            .set_json(serde_json::json!({ "email": "jane@example.com" }))
            .to_request(),
    )
    .await;
    let flow_cookie = response_cookie(&resp, AUTH_FLOW_COOKIE).unwrap();
    let id = uuid::Uuid::parse_str(flow_cookie.value()).unwrap();

    let held = state.flows.checkout(id).await.unwrap();

    let req = test::TestRequest::get()
        .uri("/api/v1/auth/flow")
        .cookie(echo(&flow_cookie))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["flow"], "password_reset");
    assert_eq!(body["data"]["step"], "code_entry");

    // a second write is still refused
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password/resend")
        .cookie(echo(&flow_cookie))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    drop(held);
}
