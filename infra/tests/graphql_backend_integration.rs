//! Integration tests for the GraphQL auth backend against a mock HTTP server

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cw_core::domain::entities::{Email, VerificationPurpose};
use cw_core::domain::flows::LoginCodeStep;
use cw_core::errors::{AuthError, BackendError, DomainError, GENERIC_FAILURE_MESSAGE};
use cw_core::services::auth::{AuthService, AuthServiceConfig};
use cw_core::services::backend::{AuthBackend, LoginRequest, SendVerificationEmailRequest};
use cw_infra::{GraphqlAuthBackend, GraphqlClient};
use cw_shared::config::BackendConfig;

fn backend_for(server: &MockServer) -> GraphqlAuthBackend {
    // RUST_LOG=debug shows the client's request logging
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let config = BackendConfig::new(format!("{}/graphql/", server.uri()));
    GraphqlAuthBackend::new(GraphqlClient::new(&config).unwrap())
}

#[tokio::test]
async fn test_send_verification_email_posts_operation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(body_partial_json(json!({
            "operationName": "SendVerificationEmail",
            "variables": {
                "email": "jane@example.com",
                "isAccountVerification": true,
                "isLoginVerification": false
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "sendVerificationEmail": { "success": true, "message": "Email sent" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let email = Email::parse("jane@example.com").unwrap();
    let result = backend
        .send_verification_email(SendVerificationEmailRequest::new(
            &email,
            VerificationPurpose::AccountVerification,
        ))
        .await
        .unwrap();

    assert_eq!(result.success, Some(true));
    assert_eq!(result.message.as_deref(), Some("Email sent"));
}

#[tokio::test]
async fn test_login_payload_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "login": {
                    "success": true,
                    "errors": null,
                    "token": "access",
                    "refreshToken": "refresh",
                    "refreshExpiresIn": 1700000000
                }
            }
        })))
        .mount(&server)
        .await;

    let result = backend_for(&server)
        .login(LoginRequest {
            email: "jane@example.com".to_string(),
            password: Some("secret1".to_string()),
            code: None,
        })
        .await
        .unwrap();

    assert_eq!(result.token.as_deref(), Some("access"));
    assert_eq!(result.refresh_token.as_deref(), Some("refresh"));
}

#[tokio::test]
async fn test_graphql_errors_become_backend_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{ "message": "Cannot query field \"login\"" }]
        })))
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .login(LoginRequest {
            email: "jane@example.com".to_string(),
            password: Some("secret1".to_string()),
            code: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Graphql(ref message) if message.contains("login")));
}

#[tokio::test]
async fn test_http_failure_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let email = Email::parse("jane@example.com").unwrap();
    let err = backend_for(&server)
        .send_verification_email(SendVerificationEmailRequest::new(
            &email,
            VerificationPurpose::PasswordReset,
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Transport(_)));
}

#[tokio::test]
async fn test_null_payload_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "register": null } })),
        )
        .mount(&server)
        .await;

    let err = backend_for(&server)
        .register(cw_core::services::backend::RegisterRequest {
            code: "123456".to_string(),
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            password1: "secret1".to_string(),
            password2: "secret1".to_string(),
            username: "jane".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Malformed(_)));
}

#[tokio::test]
async fn test_login_with_code_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "SendVerificationEmail",
            "variables": { "isLoginVerification": true, "isAccountVerification": false }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "sendVerificationEmail": { "success": true, "message": "sent" } }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "Login",
            "variables": { "email": "jane@example.com", "code": "123456", "password": null }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "login": {
                    "success": true,
                    "errors": null,
                    "token": "access",
                    "refreshToken": "refresh",
                    "refreshExpiresIn": null
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = AuthService::new(Arc::new(backend_for(&server)), AuthServiceConfig::default());
    let mut step = LoginCodeStep::default();

    service
        .request_login_code(&mut step, "jane@example.com")
        .await
        .unwrap();
    let success = service.submit_login_code(&mut step, "123456").await.unwrap();

    assert_eq!(success.tokens.access_token, "access");
}

#[tokio::test]
async fn test_unreachable_backend_shows_generic_message() {
    let server = MockServer::start().await;
    let backend = backend_for(&server);
    drop(server);

    let service = AuthService::new(Arc::new(backend), AuthServiceConfig::default());
    let err = service
        .login_with_password("jane@example.com", "secret1")
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Auth(AuthError::Transport { .. })));
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}
