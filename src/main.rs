//! Circulation Server - Library Lending & Reservation Engine

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use circulation_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{sweep, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("circulation_server={},tower_http=debug", config.logging.level).into()
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Circulation Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Start the daily reservation expiry sweep
    sweep::spawn(services.reservations.clone(), config.sweep.clone());

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Inventory (book items)
        .route("/book-items", get(api::book_items::list_book_items))
        .route("/book-items", post(api::book_items::create_book_item))
        .route("/book-items/:id", get(api::book_items::get_book_item))
        .route("/book-items/:id", put(api::book_items::update_book_item))
        .route("/book-items/:id", delete(api::book_items::delete_book_item))
        // Lendings
        .route("/lendings", get(api::lendings::list_lendings))
        .route("/lendings", post(api::lendings::create_lending))
        .route("/lendings/:id", get(api::lendings::get_lending))
        .route("/lendings/:id/complete", put(api::lendings::complete_lending))
        // Reservations
        .route("/reservations", get(api::reservations::list_reservations))
        .route("/reservations", post(api::reservations::create_reservation))
        .route("/reservations/sweep", post(api::reservations::run_expiry_sweep))
        .route("/reservations/:id", get(api::reservations::get_reservation))
        .route("/reservations/:id/fulfill", put(api::reservations::fulfill_reservation))
        .route("/reservations/:id/cancel", put(api::reservations::cancel_reservation))
        .route("/reservations/:id/complete", put(api::reservations::complete_reservation))
        // System configuration
        .route("/system-config", get(api::system_config::get_config))
        .route("/system-config", put(api::system_config::update_config))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
