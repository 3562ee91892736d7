//! Product models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product with its available stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Units available for sale
    pub quantity: i64,
}

/// Validated input for creating or renaming a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(
        min = 5,
        message = "\"name\" length must be at least 5 characters long"
    ))]
    pub name: String,

    #[validate(range(min = 1, message = "\"quantity\" must be greater than or equal to 1"))]
    pub quantity: i64,
}

impl NewProduct {
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
        }
    }
}

/// Raw product request body, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPayload {
    pub name: Option<serde_json::Value>,
    pub quantity: Option<serde_json::Value>,
}
