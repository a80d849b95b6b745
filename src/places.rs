//! Opening-hours lookup for a fixed place via a place-details API.
//!
//! Only `name` and `opening_hours` are requested. When the lookup succeeds
//! and the place publishes weekly hours, the seven `weekday_text` lines are
//! returned for display; otherwise the list is empty.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::config::PlacesConfig;
use crate::error::PlacesError;

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<PlaceDetails>,
}

/// Subset of the place-details payload this client reads.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

pub struct PlacesClient {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
    place_id: String,
}

impl PlacesClient {
    pub fn new(config: &PlacesConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            place_id: config.place_id.clone(),
        }
    }

    /// Fetch the place details, failing on transport errors or a non-`OK`
    /// lookup status.
    pub async fn details(&self) -> Result<PlaceDetails, PlacesError> {
        let resp = self
            .client
            .get(format!("{}/details/json", self.base_url))
            .query(&[
                ("place_id", self.place_id.as_str()),
                ("fields", "name,opening_hours"),
                ("key", self.api_key.expose_secret()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: DetailsResponse = resp
            .json()
            .await
            .map_err(|e| PlacesError::InvalidResponse(e.to_string()))?;

        if body.status != "OK" {
            return Err(PlacesError::LookupStatus(body.status));
        }

        body.result
            .ok_or_else(|| PlacesError::InvalidResponse("missing result".to_string()))
    }

    /// Weekday opening-hours lines, or an empty list if unavailable.
    pub async fn weekday_hours(&self) -> Vec<String> {
        match self.details().await {
            Ok(details) => {
                let hours = details
                    .opening_hours
                    .map(|h| h.weekday_text)
                    .unwrap_or_default();
                tracing::debug!(place = ?details.name, lines = hours.len(), "Fetched opening hours");
                hours
            }
            Err(e) => {
                tracing::warn!("Opening hours unavailable: {}", e);
                Vec::new()
            }
        }
    }
}
