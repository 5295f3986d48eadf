//! Login with a one-time code, opened from the plain login form.

use chrono::{DateTime, Utc};

use super::LastCodeSent;
use crate::domain::entities::Email;
use crate::errors::FlowError;

/// Steps of the login-with-code branch
#[derive(Debug, Clone)]
pub enum LoginCodeStep {
    /// Plain login form, overlay closed. Remembers the code sent before
    /// the overlay was closed so re-opening it honours the cooldown.
    EmailEntry { last_sent: Option<LastCodeSent> },
    /// Code requested, overlay open
    CodeEntry {
        email: Email,
        code_sent_at: DateTime<Utc>,
    },
    Authenticated,
}

impl Default for LoginCodeStep {
    fn default() -> Self {
        LoginCodeStep::EmailEntry { last_sent: None }
    }
}

impl LoginCodeStep {
    pub fn name(&self) -> &'static str {
        match self {
            LoginCodeStep::EmailEntry { .. } => "email_entry",
            LoginCodeStep::CodeEntry { .. } => "code_entry",
            LoginCodeStep::Authenticated => "authenticated",
        }
    }

    pub fn email(&self, operation: &'static str) -> Result<&Email, FlowError> {
        match self {
            LoginCodeStep::CodeEntry { email, .. } => Ok(email),
            other => Err(FlowError::InvalidStep {
                operation,
                step: other.name(),
            }),
        }
    }

    pub fn code_sent_at(&self) -> Option<DateTime<Utc>> {
        match self {
            LoginCodeStep::CodeEntry { code_sent_at, .. } => Some(*code_sent_at),
            _ => None,
        }
    }

    /// When a code last went to `email` on this flow, open overlay or not
    pub fn last_sent_to(&self, email: &Email) -> Option<DateTime<Utc>> {
        match self {
            LoginCodeStep::EmailEntry {
                last_sent: Some(last),
            } => last.sent_at_for(email),
            LoginCodeStep::CodeEntry {
                email: current,
                code_sent_at,
            } if current == email => Some(*code_sent_at),
            _ => None,
        }
    }

    /// Fails once the user is already logged in
    pub fn ensure_can_request(&self) -> Result<(), FlowError> {
        match self {
            LoginCodeStep::Authenticated => Err(FlowError::InvalidStep {
                operation: "request a login code",
                step: self.name(),
            }),
            _ => Ok(()),
        }
    }

    /// Open the overlay for `email`
    pub fn code_sent(&mut self, email: Email, sent_at: DateTime<Utc>) -> Result<(), FlowError> {
        self.ensure_can_request()?;
        *self = LoginCodeStep::CodeEntry {
            email,
            code_sent_at: sent_at,
        };
        Ok(())
    }

    pub fn authenticated(&mut self) -> Result<(), FlowError> {
        self.email("complete login")?;
        *self = LoginCodeStep::Authenticated;
        Ok(())
    }

    /// Close the overlay
    pub fn cancel(&mut self) -> Result<(), FlowError> {
        match self {
            LoginCodeStep::CodeEntry {
                email,
                code_sent_at,
            } => {
                let last_sent = LastCodeSent::new(email.clone(), *code_sent_at);
                *self = LoginCodeStep::EmailEntry {
                    last_sent: Some(last_sent),
                };
                Ok(())
            }
            other => Err(FlowError::InvalidStep {
                operation: "cancel the code",
                step: other.name(),
            }),
        }
    }
}
