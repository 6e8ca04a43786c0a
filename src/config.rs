/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Secret bearer credential for the places-search provider. Optional at
    /// startup: absence is reported per-request by the forwarder, never a
    /// crash.
    pub places_service_key: Option<String>,
    /// Base URL of the upstream places-search API.
    pub places_api_url: String,
    pub port: u16,
}

/// Default upstream places-search endpoint.
const DEFAULT_PLACES_API_URL: &str = "https://places-api.foursquare.com/places/search";

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            places_service_key: std::env::var("PLACES_SERVICE_KEY").ok(),
            places_api_url: std::env::var("PLACES_API_URL")
                .unwrap_or_else(|_| DEFAULT_PLACES_API_URL.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
        }
    }
}
