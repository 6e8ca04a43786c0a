//! Weather → POI category advisor.
//!
//! Pure lookup: (condition, temperature) → a suggested provider category
//! with a human-readable reason. No I/O, no hidden state; identical inputs
//! always produce identical suggestions.

use crate::models::{CategorySelection, CategorySource, Condition};

// Provider category identifiers (places-search taxonomy).
pub const CATEGORY_GARDEN: &str = "16019";
pub const CATEGORY_PARK: &str = "16032";
pub const CATEGORY_MUSEUM: &str = "10027";
pub const CATEGORY_RESTAURANT: &str = "13065";
pub const CATEGORY_COFFEE: &str = "13032";

/// Above this temperature (°C) the advisor sends people indoors regardless
/// of condition.
const HOT_THRESHOLD_C: f64 = 30.0;
/// Below this temperature (°C) the advisor sends people indoors regardless
/// of condition.
const COLD_THRESHOLD_C: f64 = 5.0;

/// Suggest a POI category for the given weather, or `None` when either
/// input is missing (no weather, no advice).
///
/// The temperature overrides take priority over the condition table: an
/// extreme reading yields the indoor museums suggestion even under clear
/// skies.
pub fn suggest(
    condition: Option<Condition>,
    temperature_c: Option<f64>,
) -> Option<CategorySelection> {
    let condition = condition?;
    let temperature_c = temperature_c?;

    if temperature_c > HOT_THRESHOLD_C {
        return Some(suggestion(
            CATEGORY_MUSEUM,
            format!(
                "It's hot out ({temperature_c:.1}\u{b0}C) - stay cool indoors at a museum"
            ),
        ));
    }
    if temperature_c < COLD_THRESHOLD_C {
        return Some(suggestion(
            CATEGORY_MUSEUM,
            format!(
                "It's cold out ({temperature_c:.1}\u{b0}C) - warm up indoors at a museum"
            ),
        ));
    }

    let (id, activity) = match condition {
        Condition::Clear | Condition::MostlyClear => (CATEGORY_GARDEN, "visit a garden"),
        Condition::PartlyCloudy
        | Condition::MostlyCloudy
        | Condition::Cloudy
        | Condition::Windy => (CATEGORY_PARK, "take a walk in a park"),
        Condition::Fog
        | Condition::LightFog
        | Condition::Drizzle
        | Condition::Rain
        | Condition::LightRain
        | Condition::HeavyRain
        | Condition::FreezingDrizzle
        | Condition::FreezingRain
        | Condition::LightFreezingRain
        | Condition::HeavyFreezingRain
        | Condition::Thunderstorm => (CATEGORY_MUSEUM, "duck into a museum"),
        Condition::Snow | Condition::Flurries | Condition::LightSnow | Condition::HeavySnow => {
            (CATEGORY_RESTAURANT, "settle into a restaurant")
        }
        Condition::IcePellets | Condition::HeavyIcePellets | Condition::LightIcePellets => {
            (CATEGORY_COFFEE, "wait it out in a coffee shop")
        }
        Condition::Unknown => (CATEGORY_RESTAURANT, "grab a bite at a restaurant"),
    };

    Some(suggestion(
        id,
        format!(
            "{} and {temperature_c:.1}\u{b0}C - {activity}",
            condition.description()
        ),
    ))
}

fn suggestion(id: &str, label: String) -> CategorySelection {
    CategorySelection {
        id: id.to_string(),
        source: CategorySource::WeatherSuggested,
        label: Some(label),
    }
}
