//! MongoDB test infrastructure
//!
//! Provides a `TestMongo` helper that creates a MongoDB container for testing.

use mongodb::{Client, Database, bson::doc};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::mongo::Mongo;

/// Test MongoDB wrapper that ensures proper cleanup
///
/// The container is automatically stopped and removed when this struct is dropped.
///
/// # Example
///
/// ```no_run
/// use test_utils::TestMongo;
///
/// # async fn example() {
/// let mongo = TestMongo::new().await;
/// let db = mongo.database("catalog_test");
/// # }
/// ```
pub struct TestMongo {
    #[allow(dead_code)]
    container: ContainerAsync<Mongo>,
    client: Client,
    pub connection_string: String,
}

impl TestMongo {
    /// Create a new test MongoDB instance
    ///
    /// Uses the MongoDB 7 image.
    pub async fn new() -> Self {
        let container = Mongo::default()
            .with_tag("7")
            .start()
            .await
            .expect("Failed to start MongoDB container");

        let host_port = container
            .get_host_port_ipv4(27017)
            .await
            .expect("Failed to get MongoDB port");

        let connection_string = format!("mongodb://127.0.0.1:{}", host_port);

        let client = Client::with_uri_str(&connection_string)
            .await
            .expect("Failed to create MongoDB client");

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .expect("MongoDB did not answer ping");

        tracing::info!(port = host_port, "Test MongoDB ready (mongo:7)");

        Self {
            container,
            client,
            connection_string,
        }
    }

    /// Get a cloned client (clients share one connection pool)
    pub fn client(&self) -> Client {
        self.client.clone()
    }

    /// Handle to a database on the test server
    pub fn database(&self, name: &str) -> Database {
        self.client.database(name)
    }

    /// Get the connection string for manual client creation
    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }
}

// Container is automatically cleaned up when TestMongo is dropped
impl Drop for TestMongo {
    fn drop(&mut self) {
        tracing::debug!("Cleaning up test MongoDB container");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Document;

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_mongo_insert_find() {
        let mongo = TestMongo::new().await;
        let collection = mongo.database("test_utils").collection::<Document>("items");

        collection
            .insert_one(doc! { "name": "skein", "weight": "worsted" })
            .await
            .unwrap();

        let found = collection
            .find_one(doc! { "name": "skein" })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get_str("weight").unwrap(), "worsted");
    }

    #[tokio::test]
    #[ignore = "requires Docker"]
    async fn test_mongo_databases_are_isolated() {
        let mongo = TestMongo::new().await;

        mongo
            .database("first")
            .collection::<Document>("items")
            .insert_one(doc! { "n": 1 })
            .await
            .unwrap();

        let count = mongo
            .database("second")
            .collection::<Document>("items")
            .count_documents(doc! {})
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
