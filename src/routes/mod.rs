//! HTTP routes for the forwarder server.

pub mod health;
pub mod places;

use axum::{routing::get, Router};

use crate::services::places::PlacesClient;

/// Shared application state for the forwarder routes.
#[derive(Clone)]
pub struct AppState {
    pub places: PlacesClient,
    /// Cached at startup for the health endpoint; the per-request check
    /// lives in `PlacesClient`.
    pub key_configured: bool,
}

/// Assemble the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/places", get(places::search_places))
        .route("/api/v1/health", get(health::health_check))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(base_url: &str, key: Option<&str>) -> Router {
        let key = key.map(String::from);
        let state = AppState {
            key_configured: key.is_some(),
            places: PlacesClient::new(base_url, key),
        };
        router(state)
    }

    async fn get_response(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_forwarder_relays_success_body() {
        let server = MockServer::start().await;
        let body = serde_json::json!({"results": [{"name": "Pike Place Market"}]});
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let (status, text) =
            get_response(app(&server.uri(), Some("sk-test")), "/api/places?lat=47.6&lon=-122.3")
                .await;
        assert_eq!(status, StatusCode::OK);
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, body);
    }

    #[tokio::test]
    async fn test_forwarder_relays_upstream_429_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(429).set_body_string(r#"{"msg":"rate limited"}"#),
            )
            .mount(&server)
            .await;

        let (status, text) =
            get_response(app(&server.uri(), Some("sk-test")), "/api/places?lat=47.6&lon=-122.3")
                .await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(text, r#"{"msg":"rate limited"}"#);
    }

    #[tokio::test]
    async fn test_forwarder_without_key_returns_500_and_no_upstream_call() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let (status, text) =
            get_response(app(&server.uri(), None), "/api/places?lat=47.6&lon=-122.3").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(text.contains("Missing places service key"));
    }

    #[tokio::test]
    async fn test_forwarder_rejects_bad_coordinates() {
        let server = MockServer::start().await;
        let (status, text) =
            get_response(app(&server.uri(), Some("sk-test")), "/api/places?lat=abc&lon=1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(text.contains("Invalid latitude"));

        let (status, _) = get_response(
            app(&server.uri(), Some("sk-test")),
            "/api/places?lat=95.0&lon=1",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_reports_missing_key_as_degraded() {
        let server = MockServer::start().await;
        let (status, text) = get_response(app(&server.uri(), None), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(text.contains("degraded"));
        assert!(text.contains("\"places_key_configured\":false"));

        let (_, text) = get_response(app(&server.uri(), Some("sk-test")), "/api/v1/health").await;
        assert!(text.contains("\"status\":\"ok\""));
    }
}
