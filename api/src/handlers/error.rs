//! Mapping of auth failures onto HTTP responses
//!
//! The `message` of every error body is the text the client shows next to
//! the form. Transport detail stays in the logs.

use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use validator::ValidationErrors;

use cw_core::errors::{AuthError, DomainError, FlowError};
use cw_shared::{error_codes, ErrorResponse};

/// Failure of an API handler
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Request body failed its structural limits
    #[error("Invalid request data")]
    InvalidRequest(#[from] ValidationErrors),
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        ApiError::Domain(err.into())
    }
}

impl ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => error_codes::VALIDATION_ERROR,
            ApiError::Domain(DomainError::Validation(_)) => error_codes::VALIDATION_ERROR,
            ApiError::Domain(DomainError::Auth(AuthError::Rejected { .. })) => {
                error_codes::REQUEST_REJECTED
            }
            ApiError::Domain(DomainError::Auth(AuthError::Transport { .. })) => {
                error_codes::BACKEND_UNAVAILABLE
            }
            ApiError::Domain(DomainError::Flow(flow)) => match flow {
                FlowError::NotFound => error_codes::FLOW_NOT_FOUND,
                FlowError::InvalidStep { .. } => error_codes::INVALID_STEP,
                FlowError::SubmissionInProgress => error_codes::SUBMISSION_IN_PROGRESS,
                FlowError::ResendTooSoon { .. } => error_codes::RESEND_TOO_SOON,
            },
            ApiError::Domain(DomainError::Internal { .. }) => error_codes::INTERNAL_ERROR,
        }
    }

    fn body(&self) -> ErrorResponse {
        match self {
            ApiError::InvalidRequest(errors) => {
                let fields: Vec<String> = errors
                    .field_errors()
                    .keys()
                    .map(|field| field.to_string())
                    .collect();
                ErrorResponse::new(self.error_code(), self.to_string()).add_detail("fields", fields)
            }
            ApiError::Domain(error) => {
                let response = ErrorResponse::new(self.error_code(), error.user_message());
                match error {
                    DomainError::Validation(validation) => {
                        response.add_detail("field", validation.field())
                    }
                    DomainError::Flow(FlowError::ResendTooSoon {
                        retry_after_seconds,
                    }) => response.add_detail("retry_after", retry_after_seconds),
                    _ => response,
                }
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Domain(error) => match error {
                DomainError::Validation(_) => StatusCode::BAD_REQUEST,
                DomainError::Auth(AuthError::Rejected { .. }) => StatusCode::BAD_REQUEST,
                DomainError::Auth(AuthError::Transport { .. }) => StatusCode::BAD_GATEWAY,
                DomainError::Flow(FlowError::NotFound) => StatusCode::NOT_FOUND,
                DomainError::Flow(FlowError::InvalidStep { .. })
                | DomainError::Flow(FlowError::SubmissionInProgress) => StatusCode::CONFLICT,
                DomainError::Flow(FlowError::ResendTooSoon { .. }) => {
                    StatusCode::TOO_MANY_REQUESTS
                }
                DomainError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ApiError::Domain(DomainError::Auth(AuthError::Transport { detail })) => {
                log::error!("Backend failure: {}", detail);
            }
            ApiError::Domain(DomainError::Internal { message }) => {
                log::error!("Internal error: {}", message);
            }
            other => log::debug!("Request failed: {}", other),
        }

        let mut response = HttpResponse::build(self.status_code());
        if let ApiError::Domain(DomainError::Flow(FlowError::ResendTooSoon {
            retry_after_seconds,
        })) = self
        {
            response.insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()));
        }
        response.json(self.body())
    }
}
