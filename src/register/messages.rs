//! User-facing messages for validation and submission failures.

use serde::{Deserialize, Serialize};

use super::submitter::SubmissionFailure;
use super::validation::{ValidationError, Validator};

/// Read-only terms text shown in the terms overlay.
pub const TERMS_TEXT: &str = "No terms and conditions currently...";

/// Label next to the terms checkbox.
pub const TERMS_CHECKBOX_LABEL: &str = "I have read and agreed to the terms and conditions.";

/// Display strings for every failure kind.
///
/// The username and password entries are prefixes: the configured minimum
/// length and a trailing `.` are appended when the message is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageCatalog {
    pub existing_credentials: String,
    pub invalid_email: String,
    pub invalid_phone: String,
    pub invalid_username: String,
    pub invalid_password: String,
    pub generic_server_error: String,
    pub terms_not_agreed: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            existing_credentials: "Email, phone number, or username already taken.".to_string(),
            invalid_email: "Invalid email format.".to_string(),
            invalid_phone: "Invalid phone format.".to_string(),
            invalid_username: "Invalid username. Username cannot contain spaces and minimum \
                               length must be at least "
                .to_string(),
            invalid_password: "Invalid password. The length must be at least ".to_string(),
            generic_server_error:
                "There was a problem registering your account. Please try again later."
                    .to_string(),
            terms_not_agreed: "You must agree to the terms and conditions before registering."
                .to_string(),
        }
    }
}

impl MessageCatalog {
    /// Load overrides from a JSON document. Keys that are absent keep their
    /// default text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validation_message(&self, error: ValidationError, limits: &Validator) -> String {
        match error {
            ValidationError::InvalidEmail => self.invalid_email.clone(),
            ValidationError::InvalidPhone => self.invalid_phone.clone(),
            ValidationError::InvalidUsername => {
                format!("{}{}.", self.invalid_username, limits.min_username_length)
            }
            ValidationError::InvalidPassword => {
                format!("{}{}.", self.invalid_password, limits.min_password_length)
            }
            ValidationError::TermsNotAgreed => self.terms_not_agreed.clone(),
        }
    }

    pub fn submission_message(&self, failure: SubmissionFailure) -> String {
        match failure {
            SubmissionFailure::Conflict => self.existing_credentials.clone(),
            SubmissionFailure::Generic => self.generic_server_error.clone(),
        }
    }
}
