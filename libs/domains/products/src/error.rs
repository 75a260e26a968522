use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use strum::VariantNames;
use thiserror::Error;

use crate::models::ProductCategory;

#[derive(Debug, Error)]
pub enum ProductError {
    /// A required path parameter was empty
    #[error("{0} parameter is required")]
    MissingParameter(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid category. Must be one of: {}", ProductCategory::VARIANTS.join(", "))]
    InvalidCategory,

    #[error("Invalid product ID format")]
    InvalidId,

    #[error("Product not found")]
    NotFound,

    #[error("No products found in category: {0}")]
    EmptyCategory(ProductCategory),

    /// Storage failure while reading `resource`; `detail` is never shown to callers
    #[error("Could not fetch {resource}: {detail}")]
    Storage {
        resource: &'static str,
        detail: String,
    },
}

pub type ProductResult<T> = Result<T, ProductError>;

impl ProductError {
    /// Re-label a storage failure with the resource the caller was fetching.
    pub(crate) fn fetching(self, resource: &'static str) -> Self {
        match self {
            ProductError::Storage { detail, .. } => ProductError::Storage { resource, detail },
            other => other,
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::MissingParameter(_)
            | ProductError::Validation(_)
            | ProductError::InvalidCategory => AppError::BadRequest(err.to_string()),
            ProductError::InvalidId | ProductError::NotFound | ProductError::EmptyCategory(_) => {
                AppError::NotFound(err.to_string())
            }
            ProductError::Storage { resource, detail } => AppError::Database {
                message: format!("Server Error - Could not fetch {}", resource),
                detail,
            },
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Storage {
            resource: "products",
            detail: err.to_string(),
        }
    }
}
