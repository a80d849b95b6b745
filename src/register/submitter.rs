//! Account-creation client and outcome classification.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::form::NewAccount;
use crate::error::SubmitError;

/// Failure kinds the user can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionFailure {
    /// An identifier (email, phone or username) is already registered.
    Conflict,
    Generic,
}

/// Result of one account-creation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionOutcome {
    Success,
    Failure(SubmissionFailure),
}

impl SubmissionOutcome {
    /// Fold a raw request result into an outcome, logging anything that is
    /// not a recognised conflict.
    pub fn from_result(result: Result<(), SubmitError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(SubmitError::Conflict) => {
                tracing::info!("Account creation rejected: credentials already taken");
                Self::Failure(SubmissionFailure::Conflict)
            }
            Err(e) => {
                tracing::warn!("Account creation failed: {}", e);
                Self::Failure(e.failure_kind())
            }
        }
    }
}

/// Remote account store.
#[async_trait]
pub trait AccountApi: Send + Sync {
    /// Issue exactly one create-account request. No retries.
    async fn create_account(&self, account: &NewAccount) -> Result<(), SubmitError>;
}

/// `AccountApi` over HTTP: `POST {base_url}/{register_path}` with a JSON body.
pub struct HttpAccountApi {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpAccountApi {
    pub fn new(base_url: &str, register_path: &str, timeout: Duration) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SubmitError::Transport(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: join_url(base_url, register_path),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AccountApi for HttpAccountApi {
    async fn create_account(&self, account: &NewAccount) -> Result<(), SubmitError> {
        tracing::info!(endpoint = %self.endpoint, "Submitting account registration");

        let resp = self
            .client
            .post(&self.endpoint)
            .json(account)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "Account created");
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), body = %body, "Registration endpoint refused request");
        Err(SubmitError::from_status(status.as_u16()))
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
