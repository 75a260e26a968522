//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document, Regex},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use tracing::instrument;

use crate::error::ProductResult;
use crate::filter::{ProductFilter, ProductSort};
use crate::models::Product;
use crate::repository::ProductRepository;

pub const COLLECTION_NAME: &str = "products";

/// MongoDB implementation of the ProductRepository
#[derive(Clone)]
pub struct MongoProductRepository {
    collection: Collection<Product>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    /// Use a custom collection name (tests run against throwaway collections)
    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<Product>(collection_name);
        Self { collection }
    }

    /// Create the indexes backing the catalog's filters and sort.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = |keys: Document, name: &str| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build()
        };

        let indexes = vec![
            index(doc! { "category": 1 }, "idx_category"),
            index(doc! { "featured": 1 }, "idx_featured"),
            index(doc! { "inStock": 1 }, "idx_in_stock"),
            index(doc! { "price": 1 }, "idx_price"),
            index(doc! { "createdAt": -1 }, "idx_created_at"),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    /// Replace the whole catalog with `products`. Used by the seed binary.
    #[instrument(skip(self, products), fields(count = products.len()))]
    pub async fn replace_all(&self, products: Vec<Product>) -> ProductResult<u64> {
        let deleted = self.collection.delete_many(doc! {}).await?;
        tracing::info!(deleted = deleted.deleted_count, "Cleared existing products");

        if products.is_empty() {
            return Ok(0);
        }

        let inserted = self.collection.insert_many(products).await?;
        Ok(inserted.inserted_ids.len() as u64)
    }

    /// Build a MongoDB filter document from ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(category) = filter.category {
            doc.insert("category", category.to_string());
        }

        if let Some(featured) = filter.featured {
            doc.insert("featured", featured);
        }

        if let Some(in_stock) = filter.in_stock {
            doc.insert("inStock", in_stock);
        }

        // Price range
        if filter.min_price.is_some() || filter.max_price.is_some() {
            let mut price_filter = doc! {};
            if let Some(min) = filter.min_price {
                price_filter.insert("$gte", min);
            }
            if let Some(max) = filter.max_price {
                price_filter.insert("$lte", max);
            }
            doc.insert("price", price_filter);
        }

        // Search text is user input; it is matched literally, never as a pattern.
        if let Some(ref search) = filter.search {
            let escaped = regex::escape(search);
            let contains = Regex {
                pattern: escaped,
                options: "i".to_string(),
            };
            doc.insert(
                "$or",
                vec![
                    doc! { "name": contains.clone() },
                    doc! { "description": contains.clone() },
                    doc! { "tags": contains },
                ],
            );
        }

        doc
    }

    fn sort_document(sort: ProductSort) -> Document {
        match sort {
            ProductSort::Newest => doc! { "createdAt": -1, "_id": -1 },
            ProductSort::FeaturedThenNewest => doc! { "featured": -1, "createdAt": -1, "_id": -1 },
        }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self))]
    async fn find(&self, filter: &ProductFilter, sort: ProductSort) -> ProductResult<Vec<Product>> {
        let mongo_filter = Self::build_filter(filter);

        let cursor = self
            .collection
            .find(mongo_filter)
            .sort(Self::sort_document(sort))
            .await?;
        let products: Vec<Product> = cursor.try_collect().await?;

        tracing::debug!(count = products.len(), "Products fetched");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::ProductQuery;
    use crate::models::ProductCategory;
    use mongodb::bson::Bson;

    #[test]
    fn test_build_filter_empty() {
        let filter = ProductFilter::default();
        let doc = MongoProductRepository::build_filter(&filter);
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_with_category_scope() {
        let filter = ProductFilter::category_scope(ProductCategory::HomeDecor);
        let doc = MongoProductRepository::build_filter(&filter);
        assert_eq!(doc, doc! { "category": "home-decor", "inStock": true });
    }

    #[test]
    fn test_build_filter_with_featured_scope() {
        let doc = MongoProductRepository::build_filter(&ProductFilter::featured_scope());
        assert_eq!(doc, doc! { "featured": true, "inStock": true });
    }

    #[test]
    fn test_build_filter_with_price_range() {
        let filter = ProductFilter {
            min_price: Some(30.0),
            max_price: Some(50.0),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        assert_eq!(doc, doc! { "price": { "$gte": 30.0, "$lte": 50.0 } });
    }

    #[test]
    fn test_build_filter_with_min_price_only() {
        let filter = ProductFilter {
            min_price: Some(30.0),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        assert_eq!(doc, doc! { "price": { "$gte": 30.0 } });
    }

    #[test]
    fn test_build_filter_escapes_search() {
        let filter = ProductFilter::try_from(ProductQuery {
            search: Some("a.b*(c)".to_string()),
            ..Default::default()
        })
        .unwrap();
        let doc = MongoProductRepository::build_filter(&filter);

        let clauses = doc.get_array("$or").unwrap();
        assert_eq!(clauses.len(), 3);

        let name = clauses[0].as_document().unwrap().get("name").unwrap();
        match name {
            Bson::RegularExpression(re) => {
                assert_eq!(re.pattern, r"a\.b\*\(c\)");
                assert_eq!(re.options, "i");
            }
            other => panic!("expected regex, got {other:?}"),
        }

        let tags = clauses[2].as_document().unwrap().get("tags").unwrap();
        match tags {
            Bson::RegularExpression(re) => {
                assert_eq!(re.pattern, r"a\.b\*\(c\)");
                assert_eq!(re.options, "i");
            }
            other => panic!("expected regex, got {other:?}"),
        }
    }

    #[test]
    fn test_sort_documents() {
        assert_eq!(
            MongoProductRepository::sort_document(ProductSort::Newest),
            doc! { "createdAt": -1, "_id": -1 }
        );
        assert_eq!(
            MongoProductRepository::sort_document(ProductSort::FeaturedThenNewest),
            doc! { "featured": -1, "createdAt": -1, "_id": -1 }
        );
    }
}
