//! HTTP handlers for Products API

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    AppError, JsonBody, UuidPath,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    ProductAddRequest, ProductCategory, ProductNameUpdateMessage, ProductResponse,
    ProductUpdateRequest,
};
use crate::repository::{ProductQuery, ProductRepository};
use crate::service::ProductService;

/// Public path of the single-product lookup, used for `Location` headers
pub const PRODUCT_BY_ID_PATH: &str = "/api/products/search/product-id";

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        get_products,
        get_product_by_id,
        search_products,
        add_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            ProductResponse, ProductAddRequest, ProductUpdateRequest,
            ProductCategory, ProductNameUpdateMessage
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(get_products).post(add_product).put(update_product),
        )
        .route("/search/product-id/{product_id}", get(get_product_by_id))
        .route("/search/{search_string}", get(search_products))
        .route("/{product_id}", delete(delete_product))
        .with_state(shared_service)
}

/// List all products
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "All products", body = Vec<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let products = service.get_products().await?;
    Ok(Json(products))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/search/product-id/{product_id}",
    tag = "Products",
    params(("product_id" = uuid::Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product_by_id<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(product_id): UuidPath,
) -> Result<Json<ProductResponse>, AppError> {
    service
        .get_product_by_condition(ProductQuery::by_id(product_id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Product {product_id} not found")))
}

/// Products whose name or category contains the search string (case-insensitive)
#[utoipa::path(
    get,
    path = "/search/{search_string}",
    tag = "Products",
    params(("search_string" = String, Path, description = "Text to look for")),
    responses(
        (status = 200, description = "Matching products", body = Vec<ProductResponse>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn search_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Path(search_string): Path<String>,
) -> ProductResult<Json<Vec<ProductResponse>>> {
    let products = service.search_products(&search_string).await?;
    Ok(Json(products))
}

/// Add a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = ProductAddRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse,
            headers(("Location" = String, description = "URL of the new product"))),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(request): JsonBody<ProductAddRequest>,
) -> Result<Response, AppError> {
    let product = service
        .add_product(request)
        .await?
        .ok_or_else(|| AppError::InternalServerError("Failed to add product".to_string()))?;

    let location = format!("{PRODUCT_BY_ID_PATH}/{}", product.product_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(product),
    )
        .into_response())
}

/// Replace every mutable field of an existing product
#[utoipa::path(
    put,
    path = "",
    tag = "Products",
    request_body = ProductUpdateRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    JsonBody(request): JsonBody<ProductUpdateRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    service
        .update_product(request)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::InternalServerError("Failed to update product".to_string()))
}

/// Delete a product by ID
#[utoipa::path(
    delete,
    path = "/{product_id}",
    tag = "Products",
    params(("product_id" = uuid::Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product deleted", body = bool),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(product_id): UuidPath,
) -> Result<Json<bool>, AppError> {
    if service.delete_product(product_id).await? {
        Ok(Json(true))
    } else {
        Err(AppError::NotFound(format!("Product {product_id} not found")))
    }
}
