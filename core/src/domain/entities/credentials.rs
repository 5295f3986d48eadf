//! Email addresses, passwords and the credentials of a single login attempt.

use std::fmt;

use cw_shared::validation::validators;

use super::verification_code::VerificationCode;
use crate::errors::ValidationError;

/// A syntactically valid email address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    /// Parse user input, ignoring surrounding whitespace
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::required("email"));
        }
        if !validators::is_valid_email(trimmed) {
            return Err(ValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text before the `@`, used as the username on registration
    pub fn local_part(&self) -> &str {
        self.0.split('@').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A password as typed. Never logged, never serialized.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw value, for building the outbound request only
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Length in characters, not bytes
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// What proves the user's identity on a login attempt
#[derive(Debug, Clone)]
pub enum LoginSecret {
    Password(Password),
    Code(VerificationCode),
}

/// Credentials of one login attempt, dropped once the call resolves
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: Email,
    pub secret: LoginSecret,
}

impl LoginCredentials {
    pub fn with_password(email: Email, password: Password) -> Self {
        Self {
            email,
            secret: LoginSecret::Password(password),
        }
    }

    pub fn with_code(email: Email, code: VerificationCode) -> Self {
        Self {
            email,
            secret: LoginSecret::Code(code),
        }
    }

    pub fn password(&self) -> Option<&str> {
        match &self.secret {
            LoginSecret::Password(password) => Some(password.expose()),
            LoginSecret::Code(_) => None,
        }
    }

    pub fn code(&self) -> Option<&str> {
        match &self.secret {
            LoginSecret::Password(_) => None,
            LoginSecret::Code(code) => Some(code.as_str()),
        }
    }
}
