//! Product Service - catalog read policies

use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::filter::{parse_category, ProductFilter, ProductQuery, ProductSort};
use crate::models::{Product, ProductCategory};
use crate::repository::ProductRepository;

/// Product service providing the catalog's read operations
///
/// All input validation happens here, before the repository is called.
/// Each operation decides its own scope, sort and empty-result behavior.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List products matching the query parameters, newest first
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let filter = ProductFilter::try_from(query)?;
        self.repository
            .find(&filter, ProductSort::Newest)
            .await
            .map_err(|e| e.fetching("products"))
    }

    /// Get a product by its 24-character hex ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ProductError::MissingParameter("Product ID"));
        }
        let id = ObjectId::parse_str(id).map_err(|_| ProductError::InvalidId)?;

        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| e.fetching("product"))?
            .ok_or(ProductError::NotFound)
    }

    /// In-stock products of one category, featured first.
    ///
    /// An empty result is an error here, unlike the other listings.
    #[instrument(skip(self))]
    pub async fn get_by_category(
        &self,
        category: &str,
    ) -> ProductResult<(ProductCategory, Vec<Product>)> {
        let category = category.trim();
        if category.is_empty() {
            return Err(ProductError::MissingParameter("Category"));
        }
        let category = parse_category(category)?;

        let products = self
            .repository
            .find(
                &ProductFilter::category_scope(category),
                ProductSort::FeaturedThenNewest,
            )
            .await
            .map_err(|e| e.fetching("products by category"))?;

        if products.is_empty() {
            return Err(ProductError::EmptyCategory(category));
        }

        Ok((category, products))
    }

    /// In-stock featured products, newest first
    #[instrument(skip(self))]
    pub async fn get_featured(&self) -> ProductResult<Vec<Product>> {
        self.repository
            .find(&ProductFilter::featured_scope(), ProductSort::Newest)
            .await
            .map_err(|e| e.fetching("featured products"))
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
