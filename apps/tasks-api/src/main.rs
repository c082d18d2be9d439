use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    info!(
        policy = %config.transition_policy,
        environment = ?config.environment,
        "Starting tasks API"
    );

    let db = connect_from_config_with_retry(config.database.clone(), Some(config.retry.clone()))
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    run_migrations::<Migrator>(&db, &config.app.name)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    let state = AppState { config, db };

    // Build router with API routes (pass reference, not ownership!)
    let api_routes = api::routes(&state);

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.app, &state.config.server);

    // Merge health endpoints into the app
    // - /health: liveness check with app name/version
    // - /ready: readiness check against the database
    let app = router
        .merge(health_router(state.config.app.clone()))
        .merge(api::ready_router(state.clone()));

    let server_config = state.config.server.clone();

    // State moves here for cleanup
    create_production_app(app, &server_config, async move {
        info!("Shutting down: closing database connections");
        match state.db.close().await {
            Ok(_) => info!("PostgreSQL connection closed successfully"),
            Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Tasks API shutdown complete");
    Ok(())
}
