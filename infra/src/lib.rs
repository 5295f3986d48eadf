//! # Infrastructure Layer
//!
//! Concrete implementations behind the core traits for the community web gateway:
//! - **GraphQL**: `reqwest` client and the `AuthBackend` over the remote API
//! - **Cache**: in-memory store of in-progress auth flows
//! - **Backend mocks**: scripted backend for tests (`mock-services` feature)
//!
//! ## Features
//!
//! - `mock-services`: Enable the scripted `MockAuthBackend` outside of this crate's tests

use std::sync::Arc;

use cw_core::errors::BackendError;
use cw_shared::config::AppConfig;

/// GraphQL client and backend implementation
pub mod graphql;

/// In-memory flow storage
pub mod cache;

/// Backend test doubles
#[cfg(any(test, feature = "mock-services"))]
pub mod backend;

pub use cache::{FlowGuard, FlowStore, FlowView};
pub use graphql::{GraphqlAuthBackend, GraphqlClient};

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Backend used by the auth service
    pub backend: Arc<GraphqlAuthBackend>,
    /// In-progress auth flows keyed by the `auth_flow` cookie
    pub flows: Arc<FlowStore>,
}

/// Build the infrastructure services from configuration
///
/// This function sets up:
/// - The GraphQL HTTP client (timeout and user agent from config)
/// - The in-memory flow store with the configured idle TTL
pub fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    config.backend.validate().map_err(InfrastructureError::Config)?;
    let client = GraphqlClient::new(&config.backend)?;
    let backend = Arc::new(GraphqlAuthBackend::new(client));
    let flows = Arc::new(FlowStore::from_config(&config.flow));

    tracing::info!(
        graphql_url = %config.backend.graphql_url,
        flow_ttl_minutes = config.flow.ttl_minutes,
        "Infrastructure services initialized successfully"
    );

    Ok(InfrastructureServices { backend, flows })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error talking to the backend
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success HTTP status
    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    /// GraphQL-level errors in the response
    #[error("GraphQL error: {0}")]
    Graphql(String),

    /// Response could not be understood
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for BackendError {
    fn from(err: InfrastructureError) -> Self {
        match err {
            InfrastructureError::Graphql(message) => BackendError::Graphql(message),
            InfrastructureError::Malformed(message) => BackendError::Malformed(message),
            other => BackendError::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_with_defaults() {
        let services = initialize(&AppConfig::default()).unwrap();
        assert_eq!(
            services.backend.client().endpoint(),
            "http://localhost:8000/graphql/"
        );
    }

    #[test]
    fn test_initialize_rejects_bad_url() {
        let mut config = AppConfig::default();
        config.backend.graphql_url = "ftp://example.com/graphql".to_string();
        assert!(matches!(
            initialize(&config),
            Err(InfrastructureError::Config(_))
        ));
    }

    #[test]
    fn test_error_classification() {
        assert!(matches!(
            BackendError::from(InfrastructureError::Status(503)),
            BackendError::Transport(_)
        ));
        assert_eq!(
            BackendError::from(InfrastructureError::Graphql("boom".to_string())),
            BackendError::Graphql("boom".to_string())
        );
    }
}
