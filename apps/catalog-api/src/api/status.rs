//! Root banner and readiness endpoints

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use axum_helpers::{run_health_checks, HealthCheckFuture};
use database::mongodb::check_health;
use mongodb::Client;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
    pub status: &'static str,
    pub database: &'static str,
}

impl WelcomeResponse {
    fn new(database_connected: bool) -> Self {
        Self {
            message: "Welcome to Hooked & Homey API! 🪝",
            status: "Server is running successfully",
            database: if database_connected {
                "Connected"
            } else {
                "Disconnected"
            },
        }
    }
}

async fn welcome(State(client): State<Client>) -> Json<WelcomeResponse> {
    Json(WelcomeResponse::new(check_health(&client).await))
}

async fn ready(State(client): State<Client>) -> Response {
    let database: HealthCheckFuture = Box::pin(async move {
        if check_health(&client).await {
            Ok(())
        } else {
            Err("MongoDB ping failed".to_string())
        }
    });

    match run_health_checks(vec![("database", database)]).await {
        Ok(ok) => ok.into_response(),
        Err(unavailable) => unavailable.into_response(),
    }
}

/// `GET /` and `GET /ready`
pub fn router(client: Client) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/ready", get(ready))
        .with_state(client)
}
