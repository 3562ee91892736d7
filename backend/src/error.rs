//! Error handling for the Store Manager API
//!
//! Business failures are returned as `AppError` values and rendered as
//! `{ "message": ... }` bodies. Store failures surface as 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ValidationFailure;
use thiserror::Error;

pub const PRODUCT_NOT_FOUND: &str = "Product not found";
pub const PRODUCTS_NOT_FOUND: &str = "Products not found";
pub const SALE_NOT_FOUND: &str = "Sale not found";
pub const SALES_NOT_FOUND: &str = "Sales not found";
pub const PRODUCT_EXISTS: &str = "Product already exists";
pub const AMOUNT_NOT_PERMITTED: &str = "Such amount is not permitted to sell";
pub const BAD_REQUEST: &str = "Bad request";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    UnprocessableQuantity(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationFailure),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn product_not_found() -> Self {
        AppError::NotFound(PRODUCT_NOT_FOUND.to_string())
    }

    pub fn sale_not_found() -> Self {
        AppError::NotFound(SALE_NOT_FOUND.to_string())
    }

    pub fn amount_not_permitted() -> Self {
        AppError::UnprocessableQuantity(AMOUNT_NOT_PERMITTED.to_string())
    }

    pub fn bad_request() -> Self {
        AppError::BadRequest(BAD_REQUEST.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UnprocessableQuantity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(failure) => {
                StatusCode::from_u16(failure.code).unwrap_or(StatusCode::BAD_REQUEST)
            }
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Numeric status code of the error envelope
    pub fn code(&self) -> u16 {
        self.status().as_u16()
    }

    /// Message shown to the client. Store failures are not leaked.
    pub fn message(&self) -> String {
        match self {
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::UnprocessableQuantity(msg)
            | AppError::BadRequest(msg) => msg.clone(),
            AppError::Validation(failure) => failure.message.clone(),
            AppError::DatabaseError(_) | AppError::Internal(_) => {
                "Internal server error".to_string()
            }
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::warn!(code = status.as_u16(), "Request rejected: {}", self);
        }

        (
            status,
            Json(ErrorResponse {
                message: self.message(),
            }),
        )
            .into_response()
    }
}

/// Result type alias for services and handlers
pub type AppResult<T> = Result<T, AppError>;
