use mongodb::{Client, Database, bson::doc, options::ClientOptions};
use std::time::Duration;
use tracing::info;

use super::{DEFAULT_DATABASE, MongoConfig};
use crate::common::{RetryPolicy, retry_with_policy};

/// Error type for MongoDB connection setup
#[derive(Debug, thiserror::Error)]
pub enum MongoError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Build a client from `config` and verify it with a `ping`.
///
/// ```ignore
/// let config = MongoConfig::new("mongodb://localhost:27017").with_database("catalog");
/// let client = connect_from_config(&config).await?;
/// ```
pub async fn connect_from_config(config: &MongoConfig) -> Result<Client, MongoError> {
    info!(url = %config.redacted_url(), "Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| MongoError::ConnectionFailed(e.to_string()))?;

    info!("Successfully connected to MongoDB");
    Ok(client)
}

/// [`connect_from_config`] with exponential backoff between failed attempts.
pub async fn connect_from_config_with_retry(
    config: &MongoConfig,
    policy: RetryPolicy,
) -> Result<Client, MongoError> {
    retry_with_policy(|| connect_from_config(config), policy).await
}

/// Database handle: the configured name, else the one in the connection
/// string, else [`DEFAULT_DATABASE`].
pub fn database_for(client: &Client, config: &MongoConfig) -> Database {
    match config.database.as_deref() {
        Some(name) => client.database(name),
        None => client
            .default_database()
            .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_for_prefers_explicit_name() {
        // Client construction is lazy; no server is contacted here.
        let client = Client::with_uri_str("mongodb://localhost:27017/from_uri").await.unwrap();

        let config = MongoConfig::new("mongodb://localhost:27017/from_uri").with_database("explicit");
        assert_eq!(database_for(&client, &config).name(), "explicit");

        let config = MongoConfig::new("mongodb://localhost:27017/from_uri");
        assert_eq!(database_for(&client, &config).name(), "from_uri");
    }

    #[tokio::test]
    async fn test_database_for_falls_back_to_default() {
        let client = Client::with_uri_str("mongodb://localhost:27017").await.unwrap();
        let config = MongoConfig::new("mongodb://localhost:27017");
        assert_eq!(database_for(&client, &config).name(), DEFAULT_DATABASE);
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let config = MongoConfig::new("not-a-mongo-url");
        let err = connect_from_config(&config).await.unwrap_err();
        assert!(matches!(err, MongoError::Mongo(_)));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect_from_config() {
        let url = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let config = MongoConfig::new(url).with_database("test");
        assert!(connect_from_config(&config).await.is_ok());
    }
}
