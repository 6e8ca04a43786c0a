use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::routes::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status ("ok" when fully configured, "degraded" otherwise)
    pub status: String,
    /// API version
    pub version: String,
    /// Whether the places service key is configured
    pub places_key_configured: bool,
}

/// Health check endpoint.
///
/// Returns the API status and version. Reports "degraded" (still 200) when
/// the places service key is missing, so deployments can spot the
/// misconfiguration before the first search fails.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let configured = state.key_configured;

    Json(HealthResponse {
        status: if configured {
            "ok".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        places_key_configured: configured,
    })
}
