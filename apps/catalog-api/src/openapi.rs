//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for Catalog API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hooked & Homey Catalog API",
        version = "0.1.0",
        description = "Read-only catalog of handmade crochet products"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Read-only product catalog")
    )
)]
pub struct ApiDoc;
