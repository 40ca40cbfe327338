//! Product CRUD request handlers.
//!
//! Provides the `/ProductApi` endpoints over the in-memory product store.

use axum::{Json, extract::State, http::StatusCode};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::api::doc::PRODUCT_TAG;
use crate::api::dto::{
    DeleteConfirmation, ErrorResponse, IdParams, Product, ProductFilter, ProductInput, ProductPage,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::extract::{AppJson, AppQuery};

/// Creates product-related routes.
///
/// Routes:
/// - POST /Create       - Create a product
/// - GET  /List         - Filtered, paginated listing
/// - POST /Update?id=   - Replace a product's fields
/// - POST /Delete?id=   - Remove a product
pub fn product_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(create_product))
        .routes(routes!(list_products))
        .routes(routes!(update_product))
        .routes(routes!(delete_product))
}

/// POST /ProductApi/Create - Create product
///
/// The server assigns the ProductID; a supplied ID is only checked for
/// collisions with existing products.
#[utoipa::path(
    post,
    path = "/Create",
    tag = PRODUCT_TAG,
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Duplicate ID, negative price or quantity, or invalid fields", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn create_product(
    State(state): State<AppState>,
    AppJson(input): AppJson<ProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let product = state.services.products.create(input)?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /ProductApi/List - List products
///
/// Filters by category (case-insensitive) and price range, then pages the
/// matches. `total` counts every match before paging.
#[utoipa::path(
    get,
    path = "/List",
    tag = PRODUCT_TAG,
    params(ProductFilter),
    responses(
        (status = 200, description = "Page of matching products", body = ProductPage),
        (status = 400, description = "Unparseable query string", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn list_products(
    State(state): State<AppState>,
    AppQuery(filter): AppQuery<ProductFilter>,
) -> AppResult<Json<ProductPage>> {
    let page = state.services.products.list(filter)?;
    Ok(Json(page))
}

/// POST /ProductApi/Update?id= - Update product
#[utoipa::path(
    post,
    path = "/Update",
    tag = PRODUCT_TAG,
    params(IdParams),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product updated", body = Product),
        (status = 400, description = "Missing id, negative price or quantity, or invalid fields", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn update_product(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IdParams>,
    AppJson(input): AppJson<ProductInput>,
) -> AppResult<Json<Product>> {
    let product = state.services.products.update(params.id, input)?;
    Ok(Json(product))
}

/// POST /ProductApi/Delete?id= - Delete product
#[utoipa::path(
    post,
    path = "/Delete",
    tag = PRODUCT_TAG,
    params(IdParams),
    responses(
        (status = 200, description = "Product deleted", body = DeleteConfirmation),
        (status = 400, description = "Missing or invalid id", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Unexpected failure", body = ErrorResponse)
    )
)]
async fn delete_product(
    State(state): State<AppState>,
    AppQuery(params): AppQuery<IdParams>,
) -> AppResult<Json<DeleteConfirmation>> {
    let confirmation = state.services.products.delete(params.id)?;
    Ok(Json(confirmation))
}
