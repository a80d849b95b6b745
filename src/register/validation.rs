//! Field validation — one format check per field, evaluated in a fixed order.
//!
//! The first failing check wins: email → phone → username → password →
//! terms. Later checks are never evaluated once one fails.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::form::RegistrationForm;

/// Minimum username length (in characters).
pub const MIN_USERNAME_LENGTH: usize = 4;

/// Minimum password length (in characters).
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// `local@domain.tld`: one `@`, non-empty local part, and a domain whose
/// last `.` is followed by a non-empty label.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").unwrap());

/// Ten-digit national number with an optional `+1` prefix, optional
/// parentheses around the area code, and space/dot/dash separators.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\+?1[\s.-]?)?(\(\d{3}\)|\d{3})[\s.-]?\d{3}[\s.-]?\d{4}$").unwrap()
});

/// Which check rejected the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("invalid email")]
    InvalidEmail,
    #[error("invalid phone")]
    InvalidPhone,
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid password")]
    InvalidPassword,
    #[error("terms not agreed")]
    TermsNotAgreed,
}

/// Result of a validation pass: `Ok(())` means every check passed.
pub type ValidationOutcome = Result<(), ValidationError>;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_PATTERN.is_match(phone)
}

/// Length thresholds for the username and password checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub min_username_length: usize,
    pub min_password_length: usize,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            min_username_length: MIN_USERNAME_LENGTH,
            min_password_length: MIN_PASSWORD_LENGTH,
        }
    }
}

impl Validator {
    pub fn new(min_username_length: usize, min_password_length: usize) -> Self {
        Self {
            min_username_length,
            min_password_length,
        }
    }

    pub fn is_valid_username(&self, username: &str) -> bool {
        !username.is_empty()
            && !username.chars().any(char::is_whitespace)
            && username.chars().count() >= self.min_username_length
    }

    pub fn is_valid_password(&self, password: &str) -> bool {
        password.chars().count() >= self.min_password_length
    }

    /// Run every check in order, stopping at the first failure.
    pub fn validate(&self, form: &RegistrationForm) -> ValidationOutcome {
        if !is_valid_email(&form.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if !is_valid_phone(&form.phone) {
            return Err(ValidationError::InvalidPhone);
        }
        if !self.is_valid_username(&form.username) {
            return Err(ValidationError::InvalidUsername);
        }
        if !self.is_valid_password(&form.password) {
            return Err(ValidationError::InvalidPassword);
        }
        if !form.terms_agreed {
            return Err(ValidationError::TermsNotAgreed);
        }
        Ok(())
    }
}
