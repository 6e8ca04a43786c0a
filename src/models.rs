//! Core domain types shared by the engine, the services, and the HTTP surface.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A validated geographic coordinate pair. The single source of truth for
/// "where" in the orchestration engine; replaced wholesale on every
/// successful resolution, never partially mutated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coordinate validation errors.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Invalid coordinate: latitude {0} out of range [-90, 90]")]
    InvalidLatitude(f64),
    #[error("Invalid coordinate: longitude {0} out of range [-180, 180]")]
    InvalidLongitude(f64),
}

impl Location {
    /// Build a `Location`, rejecting out-of-range or non-finite values.
    /// NaN fails the range comparison and is reported as out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Canonical weather conditions, mapped from the provider's numeric
/// `weatherCode`. Codes follow the Tomorrow.io table; anything the table
/// does not name degrades to `Unknown` rather than erroring, so weather
/// absence never blocks POI search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Unknown,
    Clear,
    MostlyClear,
    PartlyCloudy,
    MostlyCloudy,
    Cloudy,
    Windy,
    Fog,
    LightFog,
    Drizzle,
    Rain,
    LightRain,
    HeavyRain,
    Snow,
    Flurries,
    LightSnow,
    HeavySnow,
    FreezingDrizzle,
    FreezingRain,
    LightFreezingRain,
    HeavyFreezingRain,
    IcePellets,
    HeavyIcePellets,
    LightIcePellets,
    Thunderstorm,
}

impl Condition {
    /// Convert a provider weather code to a `Condition`.
    pub fn from_code(code: i64) -> Self {
        match code {
            1000 => Self::Clear,
            1100 => Self::MostlyClear,
            1101 => Self::PartlyCloudy,
            1102 => Self::MostlyCloudy,
            1001 => Self::Cloudy,
            3001 => Self::Windy,
            2000 => Self::Fog,
            2100 => Self::LightFog,
            4000 => Self::Drizzle,
            4001 => Self::Rain,
            4200 => Self::LightRain,
            4201 => Self::HeavyRain,
            5000 => Self::Snow,
            5001 => Self::Flurries,
            5100 => Self::LightSnow,
            5101 => Self::HeavySnow,
            6000 => Self::FreezingDrizzle,
            6001 => Self::FreezingRain,
            6200 => Self::LightFreezingRain,
            6201 => Self::HeavyFreezingRain,
            7000 => Self::IcePellets,
            7101 => Self::HeavyIcePellets,
            7102 => Self::LightIcePellets,
            8000 => Self::Thunderstorm,
            _ => Self::Unknown,
        }
    }

    /// Human-readable description, used in advisor labels.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown conditions",
            Self::Clear => "Clear",
            Self::MostlyClear => "Mostly clear",
            Self::PartlyCloudy => "Partly cloudy",
            Self::MostlyCloudy => "Mostly cloudy",
            Self::Cloudy => "Cloudy",
            Self::Windy => "Windy",
            Self::Fog => "Fog",
            Self::LightFog => "Light fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::LightRain => "Light rain",
            Self::HeavyRain => "Heavy rain",
            Self::Snow => "Snow",
            Self::Flurries => "Flurries",
            Self::LightSnow => "Light snow",
            Self::HeavySnow => "Heavy snow",
            Self::FreezingDrizzle => "Freezing drizzle",
            Self::FreezingRain => "Freezing rain",
            Self::LightFreezingRain => "Light freezing rain",
            Self::HeavyFreezingRain => "Heavy freezing rain",
            Self::IcePellets => "Ice pellets",
            Self::HeavyIcePellets => "Heavy ice pellets",
            Self::LightIcePellets => "Light ice pellets",
            Self::Thunderstorm => "Thunderstorm",
        }
    }
}

/// Weather observation for the current location. Lifecycle is tied 1:1 to
/// the engine's `Location`: invalidated, not mutated, on location change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WeatherSnapshot {
    pub condition: Condition,
    pub temperature_c: f64,
}

/// Who picked the active POI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum CategorySource {
    User,
    WeatherSuggested,
}

/// An active or proposed POI category. A user selection always overrides a
/// weather suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CategorySelection {
    /// Opaque provider category identifier.
    pub id: String,
    pub source: CategorySource,
    /// Human-readable reason, present for weather suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl CategorySelection {
    pub fn user(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: CategorySource::User,
            label: None,
        }
    }
}

/// A point of interest as returned by the places-search provider. Ordering
/// within a result set is the provider's; the engine does not re-rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Poi {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
