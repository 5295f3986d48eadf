//! Shared utilities and common types for the community web gateway
//!
//! This crate provides common functionality used across all gateway modules:
//! - Configuration types
//! - Error types and response structures
//! - Validation helpers (email, codes, log masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, BackendConfig, CookieConfig, CorsConfig, Environment, FlowConfig, LoggingConfig,
    ServerConfig,
};
pub use errors::{error_codes, ErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus};
pub use utils::{mask_email, validation};
