//! Client-side consumer of the credential-shielding forwarder.
//!
//! The engine driver never talks to the places provider directly; it goes
//! through `GET /api/places` on the forwarder, which holds the secret. This
//! client parses the relayed provider body into typed `Poi` records.

use serde::Deserialize;
use std::time::Duration;

use crate::models::{Location, Poi};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ForwarderError {
    #[error("{0}")]
    Rejected(String),
    #[error("Forwarder unavailable: {0}")]
    Unavailable(String),
}

// --- relayed provider body ---

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<PlaceResult>,
}

#[derive(Debug, Deserialize)]
struct PlaceResult {
    name: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    location: Option<PlaceAddress>,
    #[serde(default)]
    categories: Vec<PlaceCategory>,
}

#[derive(Debug, Deserialize)]
struct PlaceAddress {
    formatted_address: Option<String>,
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaceCategory {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ForwarderErrorBody {
    error: String,
}

/// Client for the forwarder's `/api/places` endpoint.
#[derive(Debug, Clone)]
pub struct ForwarderClient {
    client: reqwest::Client,
    base_url: String,
}

impl ForwarderClient {
    /// `base_url` is the forwarder's origin, e.g. `http://localhost:3001`.
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch POIs for a location and category through the forwarder.
    pub async fn search_places(
        &self,
        location: Location,
        category_id: &str,
    ) -> Result<Vec<Poi>, ForwarderError> {
        let url = format!("{}/api/places", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", location.latitude.to_string()),
                ("lon", location.longitude.to_string()),
                ("category", category_id.to_string()),
            ])
            .send()
            .await
            .map_err(|e| ForwarderError::Unavailable(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            // The forwarder relays upstream bodies verbatim; surface its
            // error field when one is present.
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ForwarderErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("forwarder returned HTTP {status}"));
            return Err(ForwarderError::Rejected(message));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| ForwarderError::Unavailable(format!("parse error: {e}")))?;

        Ok(body.results.into_iter().map(Poi::from).collect())
    }
}

impl From<PlaceResult> for Poi {
    fn from(place: PlaceResult) -> Self {
        let address = place
            .location
            .and_then(|l| l.formatted_address.or(l.address));
        let category = place.categories.into_iter().find_map(|c| c.name);
        Poi {
            name: place.name,
            latitude: place.latitude,
            longitude: place.longitude,
            address,
            category,
        }
    }
}
