//! Success envelope shared by every catalog endpoint.
//!
//! Failures use [`ErrorResponse`](crate::errors::ErrorResponse); together the
//! two types cover the `{success, data?, count?, category?, error?}` contract.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Successful response body.
///
/// `count` is present only for collections and `category` only when the
/// request was scoped to a category.
///
/// # JSON Example
///
/// ```json
/// {
///   "success": true,
///   "count": 1,
///   "category": "hats",
///   "data": [{ "id": "65f1c0ffee0000000000beef", "name": "Slouchy Beanie" }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Envelope around a single item.
    pub fn item(data: T) -> Self {
        Self {
            success: true,
            count: None,
            category: None,
            data,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Envelope around a collection; `count` mirrors its length.
    pub fn list(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(data.len()),
            category: None,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
