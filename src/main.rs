//! Deskhive Server - Coworking Office Booking System
//!
//! A Rust REST API server for office booking and payment reconciliation.

use axum::{
    routing::{delete, get, post},
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

use deskhive_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::{payments::MercadoPagoClient, Services},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            format!("deskhive_server={},tower_http=debug", config.logging.level).into()
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Deskhive Server v{}", env!("CARGO_PKG_VERSION"));

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
    let gateway = Arc::new(MercadoPagoClient::new(&config.payment));
    let services = Services::new(
        repository,
        gateway,
        &config.server,
        config.email.clone(),
    );

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
        // Branches
        .route("/branches", post(api::branches::create_branch))
        .route("/branches/:id", get(api::branches::get_branch))
        .route("/branches/:id/offices", get(api::branches::list_branch_offices))
        // Offices
        .route("/offices", post(api::offices::create_office))
        .route("/offices/:id", get(api::offices::get_office))
        .route("/offices/:id", delete(api::offices::delete_office))
        .route("/offices/:id/inactivities", post(api::offices::create_inactivity))
        .route("/offices/:id/inactivities", get(api::offices::list_inactivities))
        .route("/inactivities/:id", delete(api::offices::delete_inactivity))
        .route("/offices/:id/occupied-slots", get(api::offices::occupied_slots))
        .route("/offices/:id/has-booked", get(api::offices::has_booked))
        // Bookings
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings", get(api::bookings::list_bookings))
        // Memberships
        .route("/memberships", post(api::memberships::create_membership))
        .route("/memberships/:id", get(api::memberships::get_membership))
        .route("/membership-acquisitions", post(api::memberships::purchase_membership))
        // Payment webhooks
        .route(
            "/webhooks/payments/bookings/:id",
            post(api::webhooks::booking_payment),
        )
        .route(
            "/webhooks/payments/membership-acquisitions/:id",
            post(api::webhooks::acquisition_payment),
        )
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
