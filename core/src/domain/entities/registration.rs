//! Signup form input and the draft registration held until the code is confirmed.

use std::fmt;

use super::credentials::{Email, Password};
use crate::errors::ValidationError;

/// Raw signup form input
#[derive(Clone, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Signup details captured before verification, held in memory only
#[derive(Debug, Clone)]
pub struct RegistrationDraft {
    first_name: String,
    last_name: String,
    email: Email,
    password: Password,
}

impl RegistrationDraft {
    /// Validate a complete signup form.
    ///
    /// All four fields must be filled in; the first missing field is reported.
    pub fn from_form(form: SignupForm) -> Result<Self, ValidationError> {
        let first_name = form.first_name.trim();
        if first_name.is_empty() {
            return Err(ValidationError::required("first_name"));
        }
        let last_name = form.last_name.trim();
        if last_name.is_empty() {
            return Err(ValidationError::required("last_name"));
        }
        let email = Email::parse(&form.email)?;
        let password = Password::new(form.password);
        if password.is_blank() {
            return Err(ValidationError::required("password"));
        }

        Ok(Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email,
            password,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Username derived from the local part of the email
    pub fn username(&self) -> &str {
        self.email.local_part()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SignupForm {
        SignupForm {
            first_name: " Jane ".to_string(),
            last_name: "Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            password: "s3cret!".to_string(),
        }
    }

    #[test]
    fn test_complete_form_builds_draft() {
        let draft = RegistrationDraft::from_form(form()).unwrap();
        assert_eq!(draft.first_name(), "Jane");
        assert_eq!(draft.last_name(), "Doe");
        assert_eq!(draft.email().as_str(), "jane.doe@example.com");
        assert_eq!(draft.username(), "jane.doe");
        assert_eq!(draft.password().expose(), "s3cret!");
    }

    #[test]
    fn test_missing_fields_are_reported_in_order() {
        let mut missing_first = form();
        missing_first.first_name = "  ".to_string();
        missing_first.password = String::new();
        assert_eq!(
            RegistrationDraft::from_form(missing_first).unwrap_err().field(),
            "first_name"
        );

        let mut missing_last = form();
        missing_last.last_name = String::new();
        assert_eq!(
            RegistrationDraft::from_form(missing_last).unwrap_err().field(),
            "last_name"
        );

        let mut missing_password = form();
        missing_password.password = String::new();
        assert_eq!(
            RegistrationDraft::from_form(missing_password).unwrap_err().field(),
            "password"
        );
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut bad_email = form();
        bad_email.email = "jane.doe".to_string();
        assert_eq!(
            RegistrationDraft::from_form(bad_email).unwrap_err(),
            ValidationError::InvalidEmail
        );
    }

    #[test]
    fn test_form_debug_hides_password() {
        assert!(!format!("{:?}", form()).contains("s3cret!"));
    }
}
