//! Catalog API - read-only REST server for the Hooked & Homey product catalog

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre, install_fatal_panic_hook};
use database::mongodb::{connect_from_config_with_retry, database_for};
use database::RetryPolicy;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    install_fatal_panic_hook();

    info!("Connecting to MongoDB at {}", config.mongodb.redacted_url());

    let mongo_client = connect_from_config_with_retry(&config.mongodb, RetryPolicy::default()).await?;
    let db = database_for(&mongo_client, &config.mongodb);

    info!("Successfully connected to MongoDB database: {}", db.name());

    let state = AppState {
        config: config.clone(),
        mongo_client,
        db,
    };

    api::init_indexes(&state).await?;

    let router = create_router::<openapi::ApiDoc>(api::routes(&state), &state.config.server)?;
    let app = router
        .merge(api::status::router(state.mongo_client.clone()))
        .merge(health_router(state.config.app));

    info!(
        "Starting {} v{} on port {}",
        state.config.app.name, state.config.app.version, state.config.server.port
    );

    let mongo_client = state.mongo_client.clone();
    create_production_app(app, &state.config.server, Duration::from_secs(10), async move {
        info!("Shutting down: closing MongoDB connections");
        mongo_client.shutdown().await;
        info!("MongoDB connection closed");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Catalog API shutdown complete");
    Ok(())
}
