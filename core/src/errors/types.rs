//! Error types for the auth flows
//!
//! Every error here is shown to the user; `Display` is the user-facing text.
//! Transport detail is kept out of `Display` so it only reaches the logs.

use thiserror::Error;

/// Message shown for any transport, network or malformed-response failure
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again later.";

/// Remote-call failures, classified only as transport vs business rejection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The backend could not be reached or answered with something unusable
    #[error("An error occurred. Please try again later.")]
    Transport { detail: String },

    /// The backend reported `success: false`; the message is shown verbatim
    #[error("{message}")]
    Rejected { message: String },
}

/// Client-side checks that run before any network call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    RequiredField { field: String },

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Verification code must be {length} digits")]
    InvalidCode { length: usize },

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl ValidationError {
    /// Name of the form field the error belongs to
    pub fn field(&self) -> &str {
        match self {
            ValidationError::RequiredField { field } => field,
            ValidationError::InvalidEmail => "email",
            ValidationError::InvalidCode { .. } => "code",
            ValidationError::PasswordTooShort { .. } => "password",
            ValidationError::PasswordMismatch => "confirm_password",
        }
    }

    pub(crate) fn required(field: &str) -> Self {
        ValidationError::RequiredField {
            field: field.to_string(),
        }
    }
}

/// Errors about where a flow is, rather than what was submitted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error("No sign-in step is in progress. Please start again.")]
    NotFound,

    #[error("Cannot {operation} from the {step} step")]
    InvalidStep {
        operation: &'static str,
        step: &'static str,
    },

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Please wait {retry_after_seconds} seconds before requesting a new code")]
    ResendTooSoon { retry_after_seconds: i64 },
}

/// Failures reported by an `AuthBackend` implementation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("GraphQL error: {0}")]
    Graphql(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<BackendError> for AuthError {
    fn from(err: BackendError) -> Self {
        AuthError::Transport {
            detail: err.to_string(),
        }
    }
}
