//! Orchestration engine: location → weather → category → POI.
//!
//! Single-threaded event-driven state machine. Every external stimulus
//! (device fix, user search, weather arrival, fetch completion) enters as a
//! `Trigger`; `Engine::apply` mutates state and returns the `Effect`s to
//! execute. The reducer itself does no I/O, which is what makes the race
//! rules testable:
//!
//! - every POI fetch is tagged with a fresh generation; completions carrying
//!   a stale generation are discarded, so the visible result set always
//!   belongs to the most recently issued request
//! - a weather suggestion is computed at most once per snapshot and is
//!   offered, not auto-applied; the user's selection always wins until they
//!   explicitly accept the suggestion
//! - weather is invalidated wholesale whenever the location changes

pub mod driver;

use serde::Serialize;

use crate::advisor;
use crate::models::{CategorySelection, CategorySource, Location, Poi, WeatherSnapshot};

/// Category used before any weather suggestion or user choice exists.
const DEFAULT_CATEGORY: &str = advisor::CATEGORY_RESTAURANT;

/// External stimuli. Completions of effects re-enter through here as well,
/// so every state mutation flows through `Engine::apply`.
#[derive(Debug, Clone)]
pub enum Trigger {
    DeviceLocationAcquired { latitude: f64, longitude: f64 },
    DeviceLocationFailed { reason: String },
    CitySearchRequested { query: String },
    LocationResolved { location: Location },
    LocationResolveFailed { error: String },
    WeatherArrived { snapshot: Option<WeatherSnapshot> },
    WeatherUnavailable { error: String },
    SuggestionAccepted,
    CategoryChanged { id: String },
    PoiFetchCompleted { generation: u64, outcome: Result<Vec<Poi>, String> },
}

/// Asynchronous work requested by a transition. The driver executes these
/// and feeds their completions back as triggers.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ResolveCity { query: String },
    FetchWeather { location: Location },
    FetchPois { generation: u64, location: Location, category_id: String },
}

/// Serializable snapshot of the engine for the rendering layer.
#[derive(Debug, Clone, Serialize, Default)]
pub struct ViewState {
    pub location: Option<Location>,
    pub weather: Option<WeatherSnapshot>,
    pub category: Option<CategorySelection>,
    pub suggestion: Option<CategorySelection>,
    pub pois: Option<Vec<Poi>>,
    pub error: Option<String>,
}

/// The stateful core. Owns location, weather, category, suggestion, and the
/// POI result set; all mutation happens in `apply`.
#[derive(Debug)]
pub struct Engine {
    location: Option<Location>,
    weather: Option<WeatherSnapshot>,
    category: CategorySelection,
    suggestion: Option<CategorySelection>,
    /// Exactly-once guard: set when the advisor has run for the current
    /// snapshot, even if it produced nothing.
    suggestion_offered: bool,
    /// Monotonic tag for POI fetches; only the newest generation may update
    /// the result set.
    generation: u64,
    pois: Option<Vec<Poi>>,
    error: Option<String>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            location: None,
            weather: None,
            category: CategorySelection::user(DEFAULT_CATEGORY),
            suggestion: None,
            suggestion_offered: false,
            generation: 0,
            pois: None,
            error: None,
        }
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            location: self.location,
            weather: self.weather,
            category: Some(self.category.clone()),
            suggestion: self.suggestion.clone(),
            pois: self.pois.clone(),
            error: self.error.clone(),
        }
    }

    /// Apply one trigger and return the effects to execute.
    pub fn apply(&mut self, trigger: Trigger) -> Vec<Effect> {
        match trigger {
            Trigger::DeviceLocationAcquired {
                latitude,
                longitude,
            } => match Location::new(latitude, longitude) {
                Ok(location) => self.adopt_location(location),
                Err(e) => {
                    self.error = Some(e.to_string());
                    Vec::new()
                }
            },

            Trigger::DeviceLocationFailed { reason } => {
                // Existing location and results stay usable.
                self.error = Some(format!("Unable to get location: {reason}"));
                Vec::new()
            }

            Trigger::CitySearchRequested { query } => {
                let query = query.trim().to_string();
                if query.is_empty() {
                    // No resolver round-trip; refetch at the current spot.
                    return match self.location {
                        Some(location) => vec![self.issue_poi_fetch(location)],
                        None => {
                            self.error = Some("No location to search near".to_string());
                            Vec::new()
                        }
                    };
                }
                vec![Effect::ResolveCity { query }]
            }

            Trigger::LocationResolved { location } => self.adopt_location(location),

            Trigger::LocationResolveFailed { error } => {
                self.error = Some(error);
                Vec::new()
            }

            Trigger::WeatherArrived { snapshot } => {
                self.weather = snapshot;
                if !self.suggestion_offered {
                    self.suggestion_offered = true;
                    self.suggestion = advisor::suggest(
                        snapshot.map(|s| s.condition),
                        snapshot.map(|s| s.temperature_c),
                    );
                }
                Vec::new()
            }

            Trigger::WeatherUnavailable { error } => {
                // Advisory only; POI flow continues without a snapshot.
                tracing::debug!("Weather unavailable: {}", error);
                self.weather = None;
                Vec::new()
            }

            Trigger::SuggestionAccepted => match self.suggestion.take() {
                Some(suggestion) => {
                    self.category = suggestion;
                    match self.location {
                        Some(location) => vec![self.issue_poi_fetch(location)],
                        None => Vec::new(),
                    }
                }
                None => Vec::new(),
            },

            Trigger::CategoryChanged { id } => {
                self.category = CategorySelection {
                    id,
                    source: CategorySource::User,
                    label: None,
                };
                match self.location {
                    Some(location) => vec![self.issue_poi_fetch(location)],
                    None => Vec::new(),
                }
            }

            Trigger::PoiFetchCompleted {
                generation,
                outcome,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        "Discarding superseded POI response (generation {} < {})",
                        generation,
                        self.generation
                    );
                    return Vec::new();
                }
                match outcome {
                    Ok(pois) => {
                        self.pois = Some(pois);
                        self.error = None;
                    }
                    Err(e) => self.error = Some(e),
                }
                Vec::new()
            }
        }
    }

    /// Replace the location wholesale: weather and any pending suggestion
    /// are stale, a fresh weather fetch and a POI fetch with the current
    /// category go out together.
    fn adopt_location(&mut self, location: Location) -> Vec<Effect> {
        self.location = Some(location);
        self.weather = None;
        self.suggestion = None;
        self.suggestion_offered = false;
        self.error = None;
        vec![
            Effect::FetchWeather { location },
            self.issue_poi_fetch(location),
        ]
    }

    fn issue_poi_fetch(&mut self, location: Location) -> Effect {
        self.generation += 1;
        Effect::FetchPois {
            generation: self.generation,
            location,
            category_id: self.category.id.clone(),
        }
    }
}
