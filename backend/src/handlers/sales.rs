//! HTTP handlers for sale endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use shared::{validate_sale_lines, CreatedSale, SaleDetail, SaleEntry, SaleLinePayload, UpdatedSale};

use crate::error::{AppError, AppResult};
use crate::reply::Reply;
use crate::AppState;

/// List all sales
pub async fn list_sales(State(state): State<AppState>) -> AppResult<Reply<Vec<SaleEntry>>> {
    state.sales.get_all().await
}

/// Get the lines of a sale
pub async fn get_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
) -> AppResult<Reply<Vec<SaleDetail>>> {
    state.sales.get_by_id(sale_id).await
}

/// Register a sale
pub async fn create_sale(
    State(state): State<AppState>,
    body: Result<Json<Vec<SaleLinePayload>>, JsonRejection>,
) -> AppResult<Reply<CreatedSale>> {
    let Json(payload) = body.map_err(|_| AppError::bad_request())?;
    let lines = validate_sale_lines(&payload)?;
    state.sales.create(lines).await
}

/// Update one line of a sale. The body is an array; its first element is
/// the line to change.
pub async fn update_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
    body: Result<Json<Vec<SaleLinePayload>>, JsonRejection>,
) -> AppResult<Reply<UpdatedSale>> {
    let Json(payload) = body.map_err(|_| AppError::bad_request())?;
    let line = validate_sale_lines(&payload)?
        .into_iter()
        .next()
        .ok_or_else(AppError::bad_request)?;
    state.sales.update(sale_id, line).await
}

/// Delete a sale and restore its stock
pub async fn delete_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<i64>,
) -> AppResult<Reply<()>> {
    state.sales.delete(sale_id).await
}
