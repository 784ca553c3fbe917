use std::time::Duration;

use anyhow::Context;
use axum::Router;
use storage::Database;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;

use config::Config;
use features::{brackets, events, houses, players};
use middleware::auth::ApiKeys;

#[derive(OpenApi)]
#[openapi(
    paths(
        houses::handlers::list_houses,
        houses::handlers::update_house_points,
        players::handlers::list_players,
        players::handlers::autocomplete_players,
        players::handlers::get_player,
        players::handlers::create_player,
        players::handlers::update_player,
        players::handlers::delete_player,
        events::handlers::list_events,
        events::handlers::get_timetable,
        events::handlers::get_event,
        events::handlers::create_event,
        events::handlers::update_event,
        events::handlers::update_event_status,
        events::handlers::record_placements,
        events::handlers::delete_event,
        brackets::handlers::list_rounds,
        brackets::handlers::build_bracket,
        brackets::handlers::record_score,
    ),
    components(
        schemas(
            storage::dto::house::HouseRanking,
            storage::dto::house::UpdateHousePointsRequest,
            storage::dto::player::PlayerResponse,
            storage::dto::player::CreatePlayerRequest,
            storage::dto::player::UpdatePlayerRequest,
            storage::dto::event::CreateEventRequest,
            storage::dto::event::UpdateEventRequest,
            storage::dto::event::UpdateEventStatusRequest,
            storage::dto::event::PlacementRequest,
            storage::dto::event::PointsAward,
            storage::dto::event::PlacementResponse,
            storage::dto::event::EventResponse,
            storage::dto::event::EventSummary,
            storage::dto::event::TimetableDay,
            storage::dto::event::EventDetailResponse,
            storage::dto::bracket::BuildBracketRequest,
            storage::dto::bracket::ScoreRequest,
            storage::dto::bracket::PlayerRef,
            storage::dto::bracket::MatchResponse,
            storage::dto::bracket::RoundResponse,
            storage::models::House,
        )
    ),
    tags(
        (name = "houses", description = "House standings"),
        (name = "players", description = "Player directory"),
        (name = "events", description = "Events, timetable and placements"),
        (name = "brackets", description = "Bracket building and scoring"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

fn app(db: Database, api_keys: ApiKeys) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest("/api/houses", houses::routes::routes(api_keys.clone()))
        .nest("/api/players", players::routes::routes(api_keys.clone()))
        .nest("/api/events", events::routes::routes(api_keys))
        .with_state(db)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting House Games API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    if config.seed_defaults {
        let inserted = houses::services::seed_defaults(db.pool())
            .await
            .context("Failed to seed default houses")?;
        tracing::info!(inserted, "Default houses seeded");
    }

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("API_KEYS is empty, every write endpoint will answer 401");
    }

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app(db, api_keys))
        .await
        .context("Server error")?;

    Ok(())
}
