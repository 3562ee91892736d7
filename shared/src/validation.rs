//! Request validation for the Store Manager API
//!
//! Payloads arrive as untyped JSON. Presence and type are checked field by
//! field, in declaration order; length and range rules are then applied
//! through the `validator` derives on the typed inputs. Missing fields are
//! reported with code 400, every other rule with code 422.

use serde_json::Value;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::{NewProduct, ProductPayload, SaleLine, SaleLinePayload};

/// A rejected payload, carrying the HTTP status code to answer with
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationFailure {
    pub code: u16,
    pub message: String,
}

impl ValidationFailure {
    pub fn missing(field: &str) -> Self {
        Self {
            code: 400,
            message: format!("\"{}\" is required", field),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            code: 422,
            message: message.into(),
        }
    }

    pub fn bad_request() -> Self {
        Self {
            code: 400,
            message: "Bad request".to_string(),
        }
    }
}

// ============================================================================
// Payload Validations
// ============================================================================

/// Validate a product body into a `NewProduct`
pub fn validate_product(payload: &ProductPayload) -> Result<NewProduct, ValidationFailure> {
    let name = text_field("name", payload.name.as_ref())?;
    let quantity = integer_field("quantity", payload.quantity.as_ref())?;

    let product = NewProduct { name, quantity };
    product
        .validate()
        .map_err(|errors| first_failure(&errors, &["name", "quantity"]))?;

    Ok(product)
}

/// Validate a single sale line body into a `SaleLine`
pub fn validate_sale_line(payload: &SaleLinePayload) -> Result<SaleLine, ValidationFailure> {
    let product_id = integer_field("productId", payload.product_id.as_ref())?;
    let quantity = integer_field("quantity", payload.quantity.as_ref())?;

    let line = SaleLine {
        product_id,
        quantity,
    };
    line.validate()
        .map_err(|errors| first_failure(&errors, &["product_id", "productId", "quantity"]))?;

    Ok(line)
}

/// Validate a batch of sale lines. An empty batch is a bad request; otherwise
/// the first failing line is reported.
pub fn validate_sale_lines(payloads: &[SaleLinePayload]) -> Result<Vec<SaleLine>, ValidationFailure> {
    if payloads.is_empty() {
        return Err(ValidationFailure::bad_request());
    }

    payloads.iter().map(validate_sale_line).collect()
}

// ============================================================================
// Field Helpers
// ============================================================================

fn text_field(field: &str, value: Option<&Value>) -> Result<String, ValidationFailure> {
    match value {
        None => Err(ValidationFailure::missing(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationFailure::invalid(format!(
            "\"{}\" must be a string",
            field
        ))),
    }
}

fn integer_field(field: &str, value: Option<&Value>) -> Result<i64, ValidationFailure> {
    let number = match value {
        None => return Err(ValidationFailure::missing(field)),
        Some(Value::Number(n)) => n,
        Some(_) => {
            return Err(ValidationFailure::invalid(format!(
                "\"{}\" must be a number",
                field
            )))
        }
    };

    if let Some(n) = number.as_i64() {
        return Ok(n);
    }

    // 3.0 is accepted as 3, 3.5 and out-of-range values are not
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => Ok(f as i64),
        _ => Err(ValidationFailure::invalid(format!(
            "\"{}\" must be an integer",
            field
        ))),
    }
}

/// Pick the first rule violation, walking fields in declaration order
fn first_failure(errors: &ValidationErrors, fields: &[&'static str]) -> ValidationFailure {
    let field_errors = errors.field_errors();

    let ordered = fields
        .iter()
        .filter_map(|field| field_errors.get(field).map(|errs| (*field, *errs)));
    let rest = field_errors
        .iter()
        .filter(|(field, _)| !fields.contains(*field))
        .map(|(field, errs)| (*field, *errs));

    ordered
        .chain(rest)
        .find_map(|(field, errs)| {
            errs.first().map(|error| {
                error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("\"{}\" is invalid", field))
            })
        })
        .map(ValidationFailure::invalid)
        .unwrap_or_else(|| ValidationFailure::invalid(errors.to_string()))
}
