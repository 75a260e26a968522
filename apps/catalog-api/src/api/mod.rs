//! API routes module

pub mod products;
pub mod status;

use axum::Router;

use crate::state::AppState;

/// Routes mounted under `/api`
pub fn routes(state: &AppState) -> Router {
    products::router(state)
}

/// Initialize database indexes
pub async fn init_indexes(state: &AppState) -> eyre::Result<()> {
    products::init_indexes(state).await
}
