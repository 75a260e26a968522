//! Storage connectivity for the catalog services
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client construction, health checks and
//!   database selection
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{self, MongoConfig};
//! use database::common::RetryPolicy;
//!
//! let config = MongoConfig::from_env()?;
//! let client = mongodb::connect_from_config_with_retry(&config, RetryPolicy::default()).await?;
//! let db = mongodb::database_for(&client, &config);
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{RetryPolicy, retry_with_policy};
