//! One-time verification codes emailed to the user.

use std::fmt;

use cw_shared::validation::validators;
use serde::Serialize;

use crate::errors::ValidationError;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// A 6-digit numeric one-time code
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Parse user input, ignoring surrounding whitespace
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::required("code"));
        }
        if !validators::is_numeric_code(trimmed, CODE_LENGTH) {
            return Err(ValidationError::InvalidCode {
                length: CODE_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}

/// Why a code is being requested.
///
/// The backend only distinguishes two flags; a password reset sets neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationPurpose {
    AccountVerification,
    LoginVerification,
    PasswordReset,
}

impl VerificationPurpose {
    pub fn is_account_verification(self) -> bool {
        matches!(self, VerificationPurpose::AccountVerification)
    }

    pub fn is_login_verification(self) -> bool {
        matches!(self, VerificationPurpose::LoginVerification)
    }
}
