//! Signup: credentials entry, then a verification code, then done.

use chrono::{DateTime, Utc};

use super::LastCodeSent;
use crate::domain::entities::{Email, RegistrationDraft};
use crate::errors::FlowError;

/// Steps of the signup branch
#[derive(Debug, Clone)]
pub enum SignupStep {
    /// The four-field form is shown. After going back it remembers the
    /// code already sent so resubmitting the same email honours the cooldown.
    CredentialsEntry { last_sent: Option<LastCodeSent> },
    /// A code was emailed; the draft waits for it
    VerificationPending {
        draft: RegistrationDraft,
        code_sent_at: DateTime<Utc>,
    },
    /// Account created, client is sent to the login route
    Complete,
}

impl Default for SignupStep {
    fn default() -> Self {
        SignupStep::CredentialsEntry { last_sent: None }
    }
}

impl SignupStep {
    pub fn name(&self) -> &'static str {
        match self {
            SignupStep::CredentialsEntry { .. } => "credentials_entry",
            SignupStep::VerificationPending { .. } => "verification_pending",
            SignupStep::Complete => "complete",
        }
    }

    /// Email the pending code was sent to
    pub fn pending_email(&self) -> Option<&str> {
        match self {
            SignupStep::VerificationPending { draft, .. } => Some(draft.email().as_str()),
            _ => None,
        }
    }

    /// Fails unless new details can be submitted from here
    pub fn ensure_credentials_entry(&self) -> Result<(), FlowError> {
        match self {
            SignupStep::CredentialsEntry { .. } => Ok(()),
            other => Err(FlowError::InvalidStep {
                operation: "submit signup details",
                step: other.name(),
            }),
        }
    }

    /// The retained draft, for the register call or a resend
    pub fn draft(&self, operation: &'static str) -> Result<&RegistrationDraft, FlowError> {
        match self {
            SignupStep::VerificationPending { draft, .. } => Ok(draft),
            other => Err(FlowError::InvalidStep {
                operation,
                step: other.name(),
            }),
        }
    }

    pub fn code_sent_at(&self) -> Option<DateTime<Utc>> {
        match self {
            SignupStep::VerificationPending { code_sent_at, .. } => Some(*code_sent_at),
            _ => None,
        }
    }

    /// When a verification code last went to `email` on this flow
    pub fn last_sent_to(&self, email: &Email) -> Option<DateTime<Utc>> {
        match self {
            SignupStep::CredentialsEntry {
                last_sent: Some(last),
            } => last.sent_at_for(email),
            SignupStep::VerificationPending {
                draft,
                code_sent_at,
            } if draft.email() == email => Some(*code_sent_at),
            _ => None,
        }
    }

    /// Move to `VerificationPending` after the code email was accepted
    pub fn verification_sent(
        &mut self,
        draft: RegistrationDraft,
        sent_at: DateTime<Utc>,
    ) -> Result<(), FlowError> {
        self.ensure_credentials_entry()?;
        *self = SignupStep::VerificationPending {
            draft,
            code_sent_at: sent_at,
        };
        Ok(())
    }

    /// Restart the resend countdown
    pub fn code_resent(&mut self, sent_at: DateTime<Utc>) -> Result<(), FlowError> {
        match self {
            SignupStep::VerificationPending { code_sent_at, .. } => {
                *code_sent_at = sent_at;
                Ok(())
            }
            other => Err(FlowError::InvalidStep {
                operation: "resend the code",
                step: other.name(),
            }),
        }
    }

    /// Registration succeeded; the draft is dropped
    pub fn complete(&mut self) -> Result<(), FlowError> {
        match self {
            SignupStep::VerificationPending { .. } => {
                *self = SignupStep::Complete;
                Ok(())
            }
            other => Err(FlowError::InvalidStep {
                operation: "complete signup",
                step: other.name(),
            }),
        }
    }

    /// Return to the form, discarding the draft
    pub fn back(&mut self) -> Result<(), FlowError> {
        match self {
            SignupStep::CredentialsEntry { .. } => Ok(()),
            SignupStep::VerificationPending {
                draft,
                code_sent_at,
            } => {
                let last_sent = LastCodeSent::new(draft.email().clone(), *code_sent_at);
                *self = SignupStep::CredentialsEntry {
                    last_sent: Some(last_sent),
                };
                Ok(())
            }
            SignupStep::Complete => Err(FlowError::InvalidStep {
                operation: "go back",
                step: self.name(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SignupForm;

    fn draft() -> RegistrationDraft {
        RegistrationDraft::from_form(SignupForm {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_happy_path() {
        let mut step = SignupStep::default();
        assert_eq!(step.name(), "credentials_entry");

        step.verification_sent(draft(), Utc::now()).unwrap();
        assert_eq!(step.name(), "verification_pending");
        assert_eq!(step.pending_email(), Some("jane@example.com"));
        assert!(step.draft("verify").is_ok());

        step.complete().unwrap();
        assert_eq!(step.name(), "complete");
        assert!(step.pending_email().is_none());
    }

    #[test]
    fn test_back_clears_draft() {
        let mut step = SignupStep::default();
        let sent_at = Utc::now();
        step.verification_sent(draft(), sent_at).unwrap();
        step.back().unwrap();
        assert!(matches!(step, SignupStep::CredentialsEntry { .. }));
        assert!(step.draft("verify").is_err());
        assert!(step.code_sent_at().is_none());

        let jane = Email::parse("jane@example.com").unwrap();
        assert_eq!(step.last_sent_to(&jane), Some(sent_at));
        assert!(step
            .last_sent_to(&Email::parse("john@example.com").unwrap())
            .is_none());

        // no-op from the form itself
        step.back().unwrap();
        assert!(matches!(step, SignupStep::CredentialsEntry { .. }));
    }

    #[test]
    fn test_invalid_transitions() {
        let mut step = SignupStep::default();
        assert_eq!(
            step.complete(),
            Err(FlowError::InvalidStep {
                operation: "complete signup",
                step: "credentials_entry",
            })
        );
        assert!(step.code_resent(Utc::now()).is_err());

        step.verification_sent(draft(), Utc::now()).unwrap();
        assert!(step.verification_sent(draft(), Utc::now()).is_err());

        step.complete().unwrap();
        assert!(step.back().is_err());
    }
}
