//! Sale and sale line item models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A sale header. Line items are stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

/// One product and quantity inside a sale, identified by (sale_id, product_id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLineItem {
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

/// A requested sale line, as accepted by create and update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    #[validate(range(min = 1, message = "\"productId\" must be greater than or equal to 1"))]
    pub product_id: i64,

    #[validate(range(min = 1, message = "\"quantity\" must be greater than or equal to 1"))]
    pub quantity: i64,
}

/// Raw sale line request body, before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleLinePayload {
    pub product_id: Option<serde_json::Value>,
    pub quantity: Option<serde_json::Value>,
}

/// Row of the sales listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleEntry {
    pub sale_id: i64,
    pub date: DateTime<Utc>,
    pub product_id: i64,
    pub quantity: i64,
}

/// Row of a single sale lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetail {
    pub date: DateTime<Utc>,
    pub product_id: i64,
    pub quantity: i64,
}

/// Body returned after a sale is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSale {
    pub id: i64,
    pub items_sold: Vec<SaleLine>,
}

/// Body returned after a sale line is updated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedSale {
    pub sale_id: i64,
    pub item_updated: Vec<SaleLine>,
}
