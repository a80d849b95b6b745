//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::register::{FormRules, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, MessageCatalog, Validator};

/// Default place identifier for the opening-hours lookup.
pub const DEFAULT_PLACE_ID: &str = "ChIJN6cJ18zQuDsRs3jMViVhR6I";

/// Default place-details API root.
pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

/// Signup flow configuration.
#[derive(Debug, Clone)]
pub struct SignupConfig {
    /// Root URL of the account service.
    pub base_url: String,
    /// Path of the account-creation endpoint, relative to `base_url`.
    pub register_path: String,
    /// Timeout for the account-creation request.
    pub request_timeout: Duration,
    pub validator: Validator,
    pub messages: MessageCatalog,
}

impl Default for SignupConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            register_path: "auth/register".to_string(),
            request_timeout: Duration::from_secs(10),
            validator: Validator::default(),
            messages: MessageCatalog::default(),
        }
    }
}

impl SignupConfig {
    /// Build from `SIGNUP_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = lookup("SIGNUP_BASE_URL").unwrap_or(defaults.base_url);
        let register_path = lookup("SIGNUP_REGISTER_PATH").unwrap_or(defaults.register_path);

        let timeout_secs: u64 =
            parse_or(&lookup, "SIGNUP_TIMEOUT_SECS", defaults.request_timeout.as_secs())?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "SIGNUP_TIMEOUT_SECS".into(),
                message: "must be greater than zero".into(),
            });
        }

        let validator = Validator::new(
            parse_or(&lookup, "SIGNUP_MIN_USERNAME_LENGTH", MIN_USERNAME_LENGTH)?,
            parse_or(&lookup, "SIGNUP_MIN_PASSWORD_LENGTH", MIN_PASSWORD_LENGTH)?,
        );

        let messages = match lookup("SIGNUP_MESSAGES_PATH") {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)?;
                MessageCatalog::from_json(&raw)
                    .map_err(|e| ConfigError::ParseError(format!("{path}: {e}")))?
            }
            None => defaults.messages,
        };

        Ok(Self {
            base_url,
            register_path,
            request_timeout: Duration::from_secs(timeout_secs),
            validator,
            messages,
        })
    }

    /// Validation thresholds and messages for the session reducer.
    pub fn form_rules(&self) -> FormRules {
        FormRules {
            validator: self.validator,
            messages: self.messages.clone(),
        }
    }
}

/// Opening-hours lookup configuration. Only present when an API key is set.
#[derive(Debug, Clone)]
pub struct PlacesConfig {
    pub api_key: SecretString,
    pub place_id: String,
    pub base_url: String,
}

impl PlacesConfig {
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("PLACES_API_KEY").filter(|k| !k.is_empty())?;
        Some(Self {
            api_key: SecretString::from(api_key),
            place_id: lookup("PLACES_PLACE_ID").unwrap_or_else(|| DEFAULT_PLACE_ID.to_string()),
            base_url: lookup("PLACES_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PLACES_BASE_URL.to_string()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        }),
        None => Ok(default),
    }
}
