//! User data kept client-side alongside the tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::credentials::Email;

/// Contents of the `user_data` cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub email: String,
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl UserData {
    /// User data for someone who just logged in with `email`
    pub fn for_login(email: &Email) -> Self {
        Self {
            email: email.as_str().to_string(),
            username: email.local_part().to_string(),
            logged_in_at: Utc::now(),
        }
    }
}
