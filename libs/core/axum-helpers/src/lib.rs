//! # Axum Helpers
//!
//! Shared building blocks for the catalog HTTP services.
//!
//! ## Modules
//!
//! - **[`response`]**: The `{success, data, count, category}` success envelope
//! - **[`errors`]**: `AppError`, the failure envelope and error codes
//! - **[`http`]**: HTTP middleware (CORS, security headers)
//! - **[`server`]**: Router assembly, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! let config = ServerConfig::default();
//! let router = create_router::<ApiDoc>(Router::new(), &config)?;
//! create_production_app(router, &config, Duration::from_secs(10), async {}).await?;
//! ```

pub mod errors;
pub mod http;
pub mod response;
pub mod server;

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers};

// Re-export envelope and error types
pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use response::ApiResponse;
