//! Weather provider client and classifier.
//!
//! Fetches current conditions for a coordinate and normalizes the payload
//! into a `WeatherSnapshot`. Weather is advisory only: a missing or
//! malformed payload yields `None` (weather unavailable) rather than an
//! error, so POI search is never blocked on it.

use serde::Deserialize;
use std::time::Duration;

use crate::models::{Condition, Location, WeatherSnapshot};

const DEFAULT_WEATHER_URL: &str = "https://api.tomorrow.io/v4/weather/realtime";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Weather provider unavailable: {0}")]
    Unavailable(String),
}

// --- provider JSON response types ---

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    data: WeatherData,
}

#[derive(Debug, Deserialize)]
struct WeatherData {
    values: WeatherValues,
}

#[derive(Debug, Deserialize)]
struct WeatherValues {
    #[serde(rename = "weatherCode")]
    weather_code: Option<i64>,
    temperature: Option<f64>,
}

/// Normalize a raw provider payload into a snapshot.
///
/// Pure function. An absent `weatherCode` signals weather-unavailable and
/// yields `None`; an unmapped code yields `Condition::Unknown`; an absent
/// temperature is treated the same as an absent code.
pub fn classify(payload: &serde_json::Value) -> Option<WeatherSnapshot> {
    let response: WeatherResponse = serde_json::from_value(payload.clone()).ok()?;
    let code = response.data.values.weather_code?;
    let temperature_c = response.data.values.temperature?;
    Some(WeatherSnapshot {
        condition: Condition::from_code(code),
        temperature_c,
    })
}

/// Client for the weather provider's realtime endpoint.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for WeatherClient {
    fn default() -> Self {
        Self::new(DEFAULT_WEATHER_URL)
    }
}

impl WeatherClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    /// Fetch current weather for a location. `Ok(None)` means the provider
    /// answered but the payload carried no usable weather data.
    pub async fn fetch_current(
        &self,
        location: Location,
    ) -> Result<Option<WeatherSnapshot>, WeatherError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[(
                "location",
                format!("{},{}", location.latitude, location.longitude),
            )])
            .send()
            .await
            .map_err(|e| WeatherError::Unavailable(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(WeatherError::Unavailable(format!(
                "weather provider returned HTTP {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| WeatherError::Unavailable(format!("parse error: {e}")))?;

        Ok(classify(&payload))
    }
}
