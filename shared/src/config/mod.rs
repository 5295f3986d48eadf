//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `backend` - GraphQL endpoint and client settings
//! - `cookies` - Session cookie names, lifetimes and attributes
//! - `environment` - Environment detection and logging configuration
//! - `flow` - Auth flow timing and password rules
//! - `server` - HTTP server and CORS configuration

pub mod backend;
pub mod cookies;
pub mod environment;
pub mod flow;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use backend::BackendConfig;
pub use cookies::{
    CookieConfig, AUTH_FLOW_COOKIE, AUTH_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE, USER_DATA_COOKIE,
};
pub use environment::{Environment, LoggingConfig};
pub use flow::FlowConfig;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// GraphQL backend configuration
    #[serde(default)]
    pub backend: BackendConfig,

    /// Session cookie configuration
    #[serde(default)]
    pub cookies: CookieConfig,

    /// Auth flow configuration
    #[serde(default)]
    pub flow: FlowConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Baseline configuration for an environment, before file and env overrides
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            ..Default::default()
        }
    }

    /// Whether auth cookies should carry the `Secure` flag
    pub fn secure_cookies(&self) -> bool {
        self.cookies.secure_for(self.server.is_https())
    }

    /// Validate cross-field constraints after loading
    pub fn validate(&self) -> Result<(), String> {
        self.backend.validate()?;
        if self.flow.password_min_length == 0 {
            return Err("flow.password_min_length must be positive".to_string());
        }
        if self.flow.ttl_minutes <= 0 {
            return Err("flow.ttl_minutes must be positive".to_string());
        }
        Ok(())
    }
}
