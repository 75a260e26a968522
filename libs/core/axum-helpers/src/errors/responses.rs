//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "error": "Server Error - Could not fetch products"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - invalid query or path parameter",
    content_type = "application/json",
    example = json!({
        "success": false,
        "error": "Invalid category. Must be one of: scarves, hats, bags, home-decor, amigurumi, blankets"
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "error": "Product not found"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
