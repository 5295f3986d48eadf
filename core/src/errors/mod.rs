//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, BackendError, FlowError, ValidationError, GENERIC_FAILURE_MESSAGE};

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// Text to show next to the form
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Internal { .. } => GENERIC_FAILURE_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
