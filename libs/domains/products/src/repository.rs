use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::error::ProductResult;
use crate::filter::{ProductFilter, ProductSort};
use crate::models::Product;

/// Read-only access to the product catalog
///
/// Implementations must apply every set field of the filter and return
/// results in the order given by `sort`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products matching `filter`, ordered by `sort`
    async fn find(&self, filter: &ProductFilter, sort: ProductSort) -> ProductResult<Vec<Product>>;

    /// Get a product by ID
    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;
}
