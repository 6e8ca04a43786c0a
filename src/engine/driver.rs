//! Async driver for the orchestration engine.
//!
//! One task owns the `Engine` and serializes every mutation through it:
//! external triggers arrive on an mpsc channel, effects run as spawned
//! client calls, and each call's completion re-enters the same loop as a
//! trigger. After every transition the current `ViewState` is published
//! into a shared `Arc<RwLock<_>>` for the rendering layer.
//!
//! In-flight requests are never cancelled when superseded; the engine's
//! generation rule makes their late completions inert.

use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use crate::engine::{Effect, Engine, Trigger, ViewState};
use crate::services::forwarder::ForwarderClient;
use crate::services::geocode::GeocodeClient;
use crate::services::weather::WeatherClient;

/// Buffered trigger capacity; senders briefly backpressure past this.
const TRIGGER_CHANNEL_CAPACITY: usize = 32;

/// Shared view state handle for the rendering layer.
pub type SharedViewState = Arc<RwLock<ViewState>>;

/// The external service clients the driver executes effects against.
#[derive(Debug, Clone)]
pub struct EngineClients {
    pub geocode: GeocodeClient,
    pub weather: WeatherClient,
    pub forwarder: ForwarderClient,
}

/// Handle to a running engine: send triggers, read the view state.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    triggers: mpsc::Sender<Trigger>,
    view: SharedViewState,
}

impl EngineHandle {
    /// Enqueue a trigger. Returns `false` if the engine task has stopped.
    pub async fn send(&self, trigger: Trigger) -> bool {
        self.triggers.send(trigger).await.is_ok()
    }

    /// Snapshot of the current view state.
    pub async fn view(&self) -> ViewState {
        self.view.read().await.clone()
    }
}

/// Spawn the engine task and return its handle.
///
/// The task runs until the handle (and all its clones) are dropped.
pub fn start(clients: EngineClients) -> EngineHandle {
    let (trigger_tx, trigger_rx) = mpsc::channel(TRIGGER_CHANNEL_CAPACITY);
    let view: SharedViewState = Arc::new(RwLock::new(ViewState::default()));

    tokio::spawn(run(trigger_rx, clients, view.clone()));

    EngineHandle {
        triggers: trigger_tx,
        view,
    }
}

/// The engine loop: apply triggers, publish the view, execute effects.
async fn run(
    mut triggers: mpsc::Receiver<Trigger>,
    clients: EngineClients,
    view: SharedViewState,
) {
    let mut engine = Engine::new();
    // Effect completions re-enter through their own channel so the loop
    // keeps draining them after the external side hangs up.
    let (completion_tx, mut completions) = mpsc::channel(TRIGGER_CHANNEL_CAPACITY);

    loop {
        let trigger = tokio::select! {
            t = triggers.recv() => match t {
                Some(t) => t,
                None => break,
            },
            Some(t) = completions.recv() => t,
        };

        let effects = engine.apply(trigger);
        *view.write().await = engine.view();

        for effect in effects {
            execute(effect, &clients, completion_tx.clone());
        }
    }

    tracing::debug!("Engine driver stopped");
}

/// Run one effect in the background; its outcome comes back as a trigger.
fn execute(effect: Effect, clients: &EngineClients, completions: mpsc::Sender<Trigger>) {
    match effect {
        Effect::ResolveCity { query } => {
            let geocode = clients.geocode.clone();
            tokio::spawn(async move {
                let trigger = match geocode.resolve(&query).await {
                    Ok(location) => Trigger::LocationResolved { location },
                    Err(e) => Trigger::LocationResolveFailed {
                        error: e.to_string(),
                    },
                };
                let _ = completions.send(trigger).await;
            });
        }
        Effect::FetchWeather { location } => {
            let weather = clients.weather.clone();
            tokio::spawn(async move {
                let trigger = match weather.fetch_current(location).await {
                    Ok(snapshot) => Trigger::WeatherArrived { snapshot },
                    Err(e) => Trigger::WeatherUnavailable {
                        error: e.to_string(),
                    },
                };
                let _ = completions.send(trigger).await;
            });
        }
        Effect::FetchPois {
            generation,
            location,
            category_id,
        } => {
            let forwarder = clients.forwarder.clone();
            tokio::spawn(async move {
                let outcome = forwarder
                    .search_places(location, &category_id)
                    .await
                    .map_err(|e| e.to_string());
                let _ = completions
                    .send(Trigger::PoiFetchCompleted {
                        generation,
                        outcome,
                    })
                    .await;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::CATEGORY_GARDEN;
    use crate::models::Condition;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Poll the view until `pred` holds or the deadline passes.
    async fn wait_for<F>(handle: &EngineHandle, pred: F) -> ViewState
    where
        F: Fn(&ViewState) -> bool,
    {
        for _ in 0..100 {
            let view = handle.view().await;
            if pred(&view) {
                return view;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached; last view: {:?}", handle.view().await);
    }

    async fn mock_stack() -> (MockServer, MockServer, MockServer) {
        let geocode = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Seattle"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"lat": "47.6062", "lon": "-122.3321"}
            ])))
            .mount(&geocode)
            .await;

        let weather = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "values": { "weatherCode": 1000, "temperature": 22.0 } }
            })))
            .mount(&weather)
            .await;

        let forwarder = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/places"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "results": [
                    {"name": "Pike Place Market"},
                    {"name": "Seattle Art Museum"}
                ]
            })))
            .mount(&forwarder)
            .await;

        (geocode, weather, forwarder)
    }

    fn clients(geocode: &MockServer, weather: &MockServer, forwarder: &MockServer) -> EngineClients {
        EngineClients {
            geocode: GeocodeClient::new(&geocode.uri()),
            weather: WeatherClient::new(&weather.uri()),
            forwarder: ForwarderClient::new(&forwarder.uri()),
        }
    }

    #[tokio::test]
    async fn test_city_search_flows_to_pois_weather_and_suggestion() {
        let (geocode, weather, forwarder) = mock_stack().await;
        let handle = start(clients(&geocode, &weather, &forwarder));

        assert!(
            handle
                .send(Trigger::CitySearchRequested {
                    query: "Seattle".to_string(),
                })
                .await
        );

        let view = wait_for(&handle, |v| v.pois.is_some() && v.suggestion.is_some()).await;
        let pois = view.pois.unwrap();
        assert_eq!(pois[0].name, "Pike Place Market");
        assert_eq!(pois[1].name, "Seattle Art Museum");

        let snap = view.weather.unwrap();
        assert_eq!(snap.condition, Condition::Clear);
        // Clear and 22 °C: the advisor proposes gardens but does not apply it.
        assert_eq!(view.suggestion.unwrap().id, CATEGORY_GARDEN);
        assert_ne!(view.category.unwrap().id, CATEGORY_GARDEN);

        // Accepting promotes the suggestion and refetches.
        handle.send(Trigger::SuggestionAccepted).await;
        let view = wait_for(&handle, |v| {
            v.category.as_ref().is_some_and(|c| c.id == CATEGORY_GARDEN)
        })
        .await;
        assert!(view.suggestion.is_none());
    }

    #[tokio::test]
    async fn test_resolver_miss_surfaces_error_without_touching_state() {
        let (geocode, weather, forwarder) = mock_stack().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Atlantis"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&geocode)
            .await;

        let handle = start(clients(&geocode, &weather, &forwarder));
        handle
            .send(Trigger::CitySearchRequested {
                query: "Seattle".to_string(),
            })
            .await;
        wait_for(&handle, |v| v.pois.is_some()).await;

        handle
            .send(Trigger::CitySearchRequested {
                query: "Atlantis".to_string(),
            })
            .await;
        let view = wait_for(&handle, |v| v.error.is_some()).await;
        assert!(view.error.unwrap().contains("Atlantis"));
        assert!(view.pois.is_some());
    }

    #[tokio::test]
    async fn test_weather_outage_does_not_block_pois() {
        let (geocode, _weather, forwarder) = mock_stack().await;
        let broken_weather = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&broken_weather)
            .await;

        let handle = start(clients(&geocode, &broken_weather, &forwarder));
        handle
            .send(Trigger::DeviceLocationAcquired {
                latitude: 47.6062,
                longitude: -122.3321,
            })
            .await;

        let view = wait_for(&handle, |v| v.pois.is_some()).await;
        assert!(view.weather.is_none());
        assert!(view.suggestion.is_none());
    }
}
