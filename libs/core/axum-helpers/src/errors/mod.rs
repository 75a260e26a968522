pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Failure response body.
///
/// `success` is always `false`; `error` is a human-readable message. Internal
/// details never appear here, they are logged with an [`ErrorCode`] instead.
///
/// # JSON Example
///
/// ```json
/// {
///   "success": false,
///   "error": "Product not found"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Query extraction error: {0}")]
    QueryRejection(#[from] QueryRejection),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    /// Storage failure: `message` goes to the client, `detail` only to the logs.
    #[error("Database error: {detail}")]
    Database { message: String, detail: String },

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::QueryRejection(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database { .. } | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::QueryRejection(e) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidQuery.code(),
                    "Query extraction error: {}",
                    e
                );
                e.body_text()
            }
            AppError::BadRequest(msg) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Bad request: {}",
                    msg
                );
                msg
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                msg
            }
            AppError::Database { message, detail } => {
                tracing::error!(
                    error_code = ErrorCode::DatabaseError.code(),
                    "Database error: {}",
                    detail
                );
                message
            }
            AppError::InternalServerError(detail) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    detail
                );
                ErrorCode::InternalError.default_message().to_string()
            }
        };

        error_response(status, message)
    }
}

/// Render a failure envelope with the given status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn json_body(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_envelope() {
        let response = AppError::BadRequest("minPrice must be a number".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"success": false, "error": "minPrice must be a number"})
        );
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let response = AppError::NotFound("Product not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["error"], "Product not found");
    }

    #[tokio::test]
    async fn test_database_error_hides_detail() {
        let response = AppError::Database {
            message: "Server Error - Could not fetch products".into(),
            detail: "connection reset by peer at 10.0.0.7:27017".into(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = json_body(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Server Error - Could not fetch products");
        assert!(!body.to_string().contains("10.0.0.7"));
    }

    #[tokio::test]
    async fn test_internal_error_uses_generic_message() {
        let response = AppError::InternalServerError("task join failed".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["error"],
            ErrorCode::InternalError.default_message()
        );
    }

    #[test]
    fn test_error_response_has_no_data() {
        let value = serde_json::to_value(ErrorResponse::new("nope")).unwrap();
        assert_eq!(value, json!({"success": false, "error": "nope"}));
    }
}
