//! Domain entities that live for the length of a form interaction.

pub mod credentials;
pub mod registration;
pub mod token;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use credentials::{Email, LoginCredentials, LoginSecret, Password};
pub use registration::{RegistrationDraft, SignupForm};
pub use token::AuthTokens;
pub use user::UserData;
pub use verification_code::{VerificationCode, VerificationPurpose, CODE_LENGTH};
