//! Local input checks that run before anything touches the network.

use thiserror::Error;

use crate::models::Credentials;

pub const USERNAME_REQUIRED: &str = "Username is required";
pub const PASSWORD_REQUIRED: &str = "Password is required";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter the QR code ID")]
    EmptyPayload,
    #[error("{0}")]
    Login(LoginFieldErrors),
}

/// Per-field messages for the login form; `None` means the field is fine
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFieldErrors {
    pub password: Option<&'static str>,
    pub username: Option<&'static str>,
}

impl LoginFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

impl std::fmt::Display for LoginFieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = [self.username, self.password].into_iter().flatten().collect();
        f.write_str(&messages.join(", "))
    }
}

/// Both fields must contain something other than whitespace
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    let errors = LoginFieldErrors {
        password: credentials.password.trim().is_empty().then_some(PASSWORD_REQUIRED),
        username: credentials.username.trim().is_empty().then_some(USERNAME_REQUIRED),
    };

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Login(errors))
    }
}

/// Returns the payload with surrounding whitespace removed
pub fn validate_payload(payload: &str) -> Result<&str, ValidationError> {
    let trimmed = payload.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyPayload)
    } else {
        Ok(trimmed)
    }
}
