//! GraphQL backend configuration

use serde::{Deserialize, Serialize};

/// Where and how the gateway reaches the GraphQL backend
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// GraphQL endpoint (HTTPS POST)
    #[serde(default = "default_graphql_url")]
    pub graphql_url: String,

    /// Optional request timeout. `None` waits for the backend indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// User agent sent with every backend request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            graphql_url: default_graphql_url(),
            request_timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

impl BackendConfig {
    /// Create a backend configuration for an endpoint
    pub fn new(graphql_url: impl Into<String>) -> Self {
        Self {
            graphql_url: graphql_url.into(),
            ..Default::default()
        }
    }

    /// Check that the endpoint is an absolute http(s) URL
    pub fn validate(&self) -> Result<(), String> {
        if crate::utils::validation::validators::is_valid_url(&self.graphql_url) {
            Ok(())
        } else {
            Err(format!("Invalid GraphQL endpoint: {}", self.graphql_url))
        }
    }
}

fn default_graphql_url() -> String {
    String::from("http://localhost:8000/graphql/")
}

fn default_user_agent() -> String {
    String::from("community-web-gateway")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_config_validation() {
        assert!(BackendConfig::default().validate().is_ok());
        assert!(BackendConfig::new("ftp://example.com").validate().is_err());
        assert!(BackendConfig::new("https://api.example.com/graphql").validate().is_ok());
    }

    #[test]
    fn test_no_timeout_by_default() {
        assert!(BackendConfig::default().request_timeout_secs.is_none());
    }
}
