// Tripwise forwarder server v0.1
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tripwise::config::AppConfig;
use tripwise::routes::{self, AppState};
use tripwise::services::places::PlacesClient;

/// Tripwise forwarder API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tripwise Places Forwarder",
        version = "0.1.0",
        description = "Credential-shielding relay for the places-search provider. \
            Holds the provider's secret key server-side and forwards nearby-place \
            searches for the Tripwise recommendation engine, relaying upstream \
            responses verbatim.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Places", description = "Places search forwarding"),
    ),
    paths(
        tripwise::routes::health::health_check,
        tripwise::routes::places::search_places,
    ),
    components(
        schemas(
            tripwise::routes::health::HealthResponse,
            tripwise::errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripwise=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    if config.places_service_key.is_none() {
        tracing::warn!(
            "PLACES_SERVICE_KEY is not set; /api/places will answer 500 until it is configured"
        );
    }

    let state = AppState {
        key_configured: config.places_service_key.is_some(),
        places: PlacesClient::new(&config.places_api_url, config.places_service_key),
    };

    // CORS — browser clients on another origin call GET only
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    let app = routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Forwarder listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
