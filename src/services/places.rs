//! Upstream places-search client.
//!
//! The only component that ever sees the provider's secret credential. The
//! forwarder route calls this; the key is attached as a bearer token and is
//! never logged or echoed back in any response.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};

use crate::errors::AppError;
use crate::models::Location;

/// API version header required by the places provider.
const PLACES_API_VERSION_HEADER: &str = "X-Places-Api-Version";
const PLACES_API_VERSION: &str = "2025-06-17";

/// Search radius around the requested location, in metres.
const SEARCH_RADIUS_M: u32 = 5000;
/// Maximum number of results requested from the provider.
const RESULT_LIMIT: u32 = 10;
/// Provider sort order.
const SORT_ORDER: &str = "RATING";

/// Timeout for upstream requests. No automatic retry; the caller decides
/// whether to try again.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Client for the upstream places-search API. Holds the secret credential.
#[derive(Debug, Clone)]
pub struct PlacesClient {
    client: reqwest::Client,
    base_url: String,
    service_key: Option<String>,
}

impl PlacesClient {
    pub fn new(base_url: &str, service_key: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");
        Self {
            client,
            base_url: base_url.to_string(),
            service_key,
        }
    }

    /// Search for open, highly-rated places of `category_id` near `location`.
    ///
    /// Returns the raw upstream JSON body on success so the forwarder can
    /// relay it untouched. Upstream non-success responses come back as
    /// `AppError::Upstream` carrying the provider's status and body verbatim;
    /// transport and parse failures as `AppError::UpstreamUnavailable`.
    pub async fn search(
        &self,
        location: Location,
        category_id: &str,
    ) -> Result<serde_json::Value, AppError> {
        // Presence check happens before any outbound traffic.
        let service_key = self
            .service_key
            .as_deref()
            .ok_or(AppError::MissingServiceKey)?;

        let url = format!(
            "{}?ll={},{}&radius={}&limit={}&sort={}&open_now=true&categories={}",
            self.base_url,
            location.latitude,
            location.longitude,
            SEARCH_RADIUS_M,
            RESULT_LIMIT,
            SORT_ORDER,
            category_id
        );

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {service_key}"))
                .map_err(|_| AppError::UpstreamUnavailable("invalid service key".to_string()))?,
        );
        headers.insert(
            PLACES_API_VERSION_HEADER,
            HeaderValue::from_static(PLACES_API_VERSION),
        );

        let response = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("places request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Places upstream returned HTTP {}", status);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("places JSON parse error: {e}")))
    }
}
