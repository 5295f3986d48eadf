//! Integration tests for the forgot password endpoints

mod common;

use actix_web::{http::StatusCode, test};
use cw_api::app::create_app;
use cw_shared::config::AUTH_FLOW_COOKIE;

use common::{echo, response_cookie, test_state};

/// Request a reset code for jane@example.com and return the flow cookie
macro_rules! start_reset {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/password/forgot")
            .set_json(serde_json::json!({ "email": "jane@example.com" }))
            .to_request();
        let resp = test::call_service($app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        response_cookie(&resp, AUTH_FLOW_COOKIE).expect("auth_flow cookie")
    }};
}

#[actix_web::test]
async fn test_forgot_password_sends_reset_code() {
    let (state, backend) = test_state();
    let app = test::init_service(create_app(state)).await;

    let _flow_cookie = start_reset!(&app);

    let sends = backend.send_calls();
    assert_eq!(sends.len(), 1);
    assert_eq!(sends[0].email, "jane@example.com");
    assert!(!sends[0].is_account_verification);
    assert!(!sends[0].is_login_verification);
}

#[actix_web::test]
async fn test_reset_succeeds_with_backend_message() {
    let (state, backend) = test_state();
    let app = test::init_service(create_app(state)).await;
    let flow_cookie = start_reset!(&app);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password/reset")
        .cookie(echo(&flow_cookie))
        .set_json(serde_json::json!({
            "code": "123456",
            "password": "newpass1",
            "confirm_password": "newpass1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(response_cookie(&resp, AUTH_FLOW_COOKIE).unwrap().value(), "");
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["message"], "Password has been reset successfully");
    assert_eq!(body["data"]["redirect"]["route"], "login");
    assert_eq!(body["data"]["redirect"]["delay_ms"], 2000);

    let resets = backend.password_reset_calls();
    assert_eq!(resets.len(), 1);
    assert_eq!(resets[0].code, "123456");
    assert_eq!(resets[0].password, "newpass1");
    assert_eq!(resets[0].confirm_password, "newpass1");
}

#[actix_web::test]
async fn test_local_checks_run_before_any_call() {
    let (state, backend) = test_state();
    let app = test::init_service(create_app(state)).await;
    let flow_cookie = start_reset!(&app);

    let cases = [
        (
            serde_json::json!({
                "code": "12345",
                "password": "newpass1",
                "confirm_password": "newpass1"
            }),
            "code",
        ),
        (
            serde_json::json!({
                "code": "123456",
                "password": "short",
                "confirm_password": "short"
            }),
            "password",
        ),
        (
            serde_json::json!({
                "code": "123456",
                "password": "newpass1",
                "confirm_password": "newpass2"
            }),
            "confirm_password",
        ),
    ];

    for (payload, field) in cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/password/reset")
            .cookie(echo(&flow_cookie))
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["details"]["field"], field);
    }

    assert!(backend.password_reset_calls().is_empty());
}

#[actix_web::test]
async fn test_reset_without_forgot_step_is_not_found() {
    let (state, backend) = test_state();
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password/reset")
        .set_json(serde_json::json!({
            "code": "123456",
            "password": "newpass1",
            "confirm_password": "newpass1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(backend.calls().is_empty());
}

#[actix_web::test]
async fn test_rerequest_for_same_email_is_throttled() {
    let (state, backend) = test_state();
    let app = test::init_service(create_app(state)).await;
    let flow_cookie = start_reset!(&app);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password/forgot")
        .cookie(echo(&flow_cookie))
        .set_json(serde_json::json!({ "email": "jane@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/password/forgot")
        .cookie(echo(&flow_cookie))
        .set_json(serde_json::json!({ "email": "other@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(backend.send_calls().len(), 2);
}
