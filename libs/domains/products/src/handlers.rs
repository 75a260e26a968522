//! HTTP handlers for the catalog endpoints

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    routing::get,
    Router,
};
use axum_helpers::{
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
    ApiResponse, AppError, ErrorResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::filter::ProductQuery;
use crate::models::{
    Difficulty, DimensionUnit, Dimensions, Material, ProductCategory, ProductResponse, YarnWeight,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

type ProductList = ApiResponse<Vec<ProductResponse>>;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products, get_featured, get_by_category, get_product),
    components(
        schemas(
            ProductResponse, ProductCategory, Material, YarnWeight,
            Dimensions, DimensionUnit, Difficulty, ErrorResponse
        ),
        responses(NotFoundResponse, BadRequestResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Products", description = "Read-only product catalog")
    )
)]
pub struct ApiDoc;

/// Create the products router.
///
/// The literal `/featured` and `/category/{category}` routes are registered
/// ahead of `/{id}` and always win over it.
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products))
        .route("/featured", get(get_featured))
        .route("/category/{category}", get(get_by_category))
        .route("/{id}", get(get_product))
        .with_state(shared_service)
}

/// Mount the products router under `prefix`.
///
/// `{prefix}/` with a trailing slash also serves the list endpoint.
pub fn nested_router<R: ProductRepository + 'static>(
    prefix: &str,
    service: ProductService<R>,
) -> Router {
    let trailing_slash = Router::new()
        .route(&format!("{}/", prefix), get(list_products::<R>))
        .with_state(Arc::new(service.clone()));

    Router::new()
        .nest(prefix, router(service))
        .merge(trailing_slash)
}

fn into_list(products: Vec<crate::models::Product>) -> ProductList {
    ApiResponse::list(products.into_iter().map(ProductResponse::from).collect())
}

/// List products with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Matching products, newest first", body = ApiResponse<Vec<ProductResponse>>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<ProductList, AppError> {
    let Query(query) = query?;
    let products = service.list_products(query).await?;
    Ok(into_list(products))
}

/// Featured, in-stock products
#[utoipa::path(
    get,
    path = "/featured",
    tag = "Products",
    responses(
        (status = 200, description = "Featured products, newest first", body = ApiResponse<Vec<ProductResponse>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_featured<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> Result<ProductList, AppError> {
    let products = service.get_featured().await?;
    Ok(into_list(products))
}

/// In-stock products of one category
#[utoipa::path(
    get,
    path = "/category/{category}",
    tag = "Products",
    params(
        ("category" = ProductCategory, Path, description = "Product category")
    ),
    responses(
        (status = 200, description = "Products in the category, featured first", body = ApiResponse<Vec<ProductResponse>>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_by_category<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(category): Path<String>,
) -> Result<ProductList, AppError> {
    let (category, products) = service.get_by_category(&category).await?;
    Ok(into_list(products).with_category(category.to_string()))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = String, Path, description = "Product ID (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Product found", body = ApiResponse<ProductResponse>),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<ProductResponse>, AppError> {
    let product = service.get_product(&id).await?;
    Ok(ApiResponse::item(product.into()))
}
