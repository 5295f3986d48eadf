//! Forgot password: email, then code with the new password, then done.

use chrono::{DateTime, Utc};

use crate::domain::entities::Email;
use crate::errors::FlowError;

/// Steps of the password reset branch
#[derive(Debug, Clone, Default)]
pub enum PasswordResetStep {
    #[default]
    EmailEntry,
    CodeEntry {
        email: Email,
        code_sent_at: DateTime<Utc>,
    },
    Done {
        message: String,
    },
}

impl PasswordResetStep {
    pub fn name(&self) -> &'static str {
        match self {
            PasswordResetStep::EmailEntry => "email_entry",
            PasswordResetStep::CodeEntry { .. } => "code_entry",
            PasswordResetStep::Done { .. } => "done",
        }
    }

    pub fn email(&self, operation: &'static str) -> Result<&Email, FlowError> {
        match self {
            PasswordResetStep::CodeEntry { email, .. } => Ok(email),
            other => Err(FlowError::InvalidStep {
                operation,
                step: other.name(),
            }),
        }
    }

    pub fn code_sent_at(&self) -> Option<DateTime<Utc>> {
        match self {
            PasswordResetStep::CodeEntry { code_sent_at, .. } => Some(*code_sent_at),
            _ => None,
        }
    }

    pub fn ensure_can_request(&self) -> Result<(), FlowError> {
        match self {
            PasswordResetStep::Done { .. } => Err(FlowError::InvalidStep {
                operation: "request a reset code",
                step: self.name(),
            }),
            _ => Ok(()),
        }
    }

    pub fn code_sent(&mut self, email: Email, sent_at: DateTime<Utc>) -> Result<(), FlowError> {
        self.ensure_can_request()?;
        *self = PasswordResetStep::CodeEntry {
            email,
            code_sent_at: sent_at,
        };
        Ok(())
    }

    pub fn done(&mut self, message: String) -> Result<(), FlowError> {
        self.email("reset the password")?;
        *self = PasswordResetStep::Done { message };
        Ok(())
    }
}
