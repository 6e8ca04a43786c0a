//! Credential-shielding places forwarder.
//!
//! GET /api/places?lat=&lon=&category= — validates the coordinates, then
//! relays the search to the upstream provider with the secret attached
//! server-side. Success and upstream-error bodies pass through untouched;
//! the secret never leaves this process.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::advisor::CATEGORY_RESTAURANT;
use crate::errors::AppError;
use crate::models::Location;
use crate::routes::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct PlacesQuery {
    /// Latitude of the search centre
    pub lat: String,
    /// Longitude of the search centre
    pub lon: String,
    /// Provider category identifier; defaults to restaurants
    pub category: Option<String>,
}

/// Search for places near a coordinate.
///
/// Relays the upstream places-search response verbatim, including upstream
/// error statuses and bodies.
#[utoipa::path(
    get,
    path = "/api/places",
    tag = "Places",
    params(PlacesQuery),
    responses(
        (status = 200, description = "Upstream search response, relayed as-is"),
        (status = 400, description = "Unparseable coordinates", body = crate::errors::ErrorResponse),
        (status = 500, description = "Places service key not configured", body = crate::errors::ErrorResponse),
        (status = 502, description = "Places provider unreachable", body = crate::errors::ErrorResponse),
    )
)]
pub async fn search_places(
    State(state): State<AppState>,
    Query(query): Query<PlacesQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let latitude: f64 = query
        .lat
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid latitude \"{}\"", query.lat)))?;
    let longitude: f64 = query
        .lon
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid longitude \"{}\"", query.lon)))?;
    let location = Location::new(latitude, longitude)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let category = query.category.as_deref().unwrap_or(CATEGORY_RESTAURANT);

    tracing::debug!(
        "Forwarding places search at {},{} category {}",
        location.latitude,
        location.longitude,
        category
    );
    let body = state.places.search(location, category).await?;
    Ok(Json(body))
}
