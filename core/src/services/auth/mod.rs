//! Authentication service module
//!
//! Drives the signup, login, login-with-code and password reset flows:
//! local validation first, then the backend call, then the step transition.

mod config;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::AuthServiceConfig;
pub use service::AuthService;
pub use types::{CodeSent, LoginSuccess, PasswordResetComplete};
