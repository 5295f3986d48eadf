//! # Community Web Core
//!
//! Core logic for the community web gateway's authentication flows.
//! This crate contains the credential entities, the typed step machines for
//! signup, login-with-code and password reset, the session model, the
//! backend trait and the auth service that drives the flows.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
