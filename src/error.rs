//! Error types for account signup.

use crate::register::SubmissionFailure;

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why an account-creation request did not succeed.
///
/// Only `Conflict` carries meaning for the user; everything else is folded
/// into the generic failure message.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Email, phone, or username already registered")]
    Conflict,

    #[error("Unexpected response status {0}")]
    Status(u16),

    #[error("Request timed out")]
    Timeout,

    #[error("Transport error: {0}")]
    Transport(String),
}

impl SubmitError {
    /// Classify a non-2xx status code.
    pub fn from_status(status: u16) -> Self {
        if status == 403 {
            Self::Conflict
        } else {
            Self::Status(status)
        }
    }

    /// The user-facing failure kind this error maps to.
    pub fn failure_kind(&self) -> SubmissionFailure {
        match self {
            Self::Conflict => SubmissionFailure::Conflict,
            Self::Status(_) | Self::Timeout | Self::Transport(_) => SubmissionFailure::Generic,
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if let Some(status) = e.status() {
            Self::from_status(status.as_u16())
        } else {
            Self::Transport(e.to_string())
        }
    }
}

/// Opening-hours lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    #[error("Place details request failed: {0}")]
    RequestFailed(String),

    #[error("Place details lookup returned status {0}")]
    LookupStatus(String),

    #[error("Invalid place details response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for PlacesError {
    fn from(e: reqwest::Error) -> Self {
        Self::RequestFailed(e.to_string())
    }
}
