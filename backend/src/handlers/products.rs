//! HTTP handlers for product endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use shared::{validate_product, Product, ProductPayload};

use crate::error::{AppError, AppResult};
use crate::reply::Reply;
use crate::AppState;

/// Query string of the search endpoint
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// List all products
pub async fn list_products(State(state): State<AppState>) -> AppResult<Reply<Vec<Product>>> {
    state.products.get_all().await
}

/// Search products by name
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Reply<Vec<Product>>> {
    state.products.search(query.q.as_deref().unwrap_or_default()).await
}

/// Get a product by id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Reply<Product>> {
    state.products.get_by_id(id).await
}

/// Create a product
pub async fn create_product(
    State(state): State<AppState>,
    body: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<Reply<Product>> {
    let Json(payload) = body.map_err(|_| AppError::bad_request())?;
    let input = validate_product(&payload)?;
    state.products.create(input).await
}

/// Rename a product or overwrite its stock
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<ProductPayload>, JsonRejection>,
) -> AppResult<Reply<Product>> {
    let Json(payload) = body.map_err(|_| AppError::bad_request())?;
    let input = validate_product(&payload)?;
    state.products.update(id, input).await
}

/// Delete a product
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Reply<()>> {
    state.products.delete(id).await
}
