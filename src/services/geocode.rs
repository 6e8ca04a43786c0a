//! Forward geocoding: convert a free-text place name to coordinates.
//!
//! Uses a Nominatim-style search endpoint (free, no API key). The resolver
//! takes the provider's first result as-is; no re-ranking.

use serde::Deserialize;
use std::time::Duration;

use crate::models::Location;

const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";
const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Tripwise/0.1 (https://github.com/tripwise)";

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("No results for \"{0}\"")]
    PlaceNotFound(String),
    #[error("Geocoder unavailable: {0}")]
    Unavailable(String),
}

/// One geocoder hit. Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct GeocodeHit {
    lat: String,
    lon: String,
}

/// Client for the city-name geocoder.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for GeocodeClient {
    fn default() -> Self {
        Self::new(DEFAULT_GEOCODE_URL)
    }
}

impl GeocodeClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Resolve a place name to a canonical `Location` using the first result
    /// in the provider's ordering.
    pub async fn resolve(&self, query: &str) -> Result<Location, GeocodeError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodeError::Unavailable(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(GeocodeError::Unavailable(format!(
                "geocoder returned HTTP {}",
                response.status()
            )));
        }

        let hits: Vec<GeocodeHit> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Unavailable(format!("parse error: {e}")))?;

        let first = hits
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::PlaceNotFound(query.to_string()))?;

        let latitude: f64 = first
            .lat
            .parse()
            .map_err(|_| GeocodeError::Unavailable(format!("bad latitude \"{}\"", first.lat)))?;
        let longitude: f64 = first
            .lon
            .parse()
            .map_err(|_| GeocodeError::Unavailable(format!("bad longitude \"{}\"", first.lon)))?;

        let location = Location::new(latitude, longitude)
            .map_err(|e| GeocodeError::Unavailable(e.to_string()))?;

        tracing::info!(
            "Geocoded \"{}\" to {},{}",
            query,
            location.latitude,
            location.longitude
        );
        Ok(location)
    }
}
