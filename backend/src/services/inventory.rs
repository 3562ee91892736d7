//! Stock checks for sales: admissibility of a new sale and the stock delta
//! applied when a sale line changes quantity

use std::collections::{BTreeMap, HashMap};

use futures::stream::{FuturesUnordered, StreamExt};
use shared::{Product, SaleLine};

use crate::error::{AppError, AppResult, AMOUNT_NOT_PERMITTED, PRODUCT_NOT_FOUND};
use crate::store::ProductStore;

/// Reason a requested sale line cannot be honoured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockIssue {
    ProductNotFound,
    InsufficientStock,
}

impl StockIssue {
    pub fn code(&self) -> u16 {
        match self {
            StockIssue::ProductNotFound => 404,
            StockIssue::InsufficientStock => 422,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StockIssue::ProductNotFound => PRODUCT_NOT_FOUND,
            StockIssue::InsufficientStock => AMOUNT_NOT_PERMITTED,
        }
    }
}

impl From<StockIssue> for AppError {
    fn from(issue: StockIssue) -> Self {
        match issue {
            StockIssue::ProductNotFound => AppError::product_not_found(),
            StockIssue::InsufficientStock => AppError::amount_not_permitted(),
        }
    }
}

/// Outcome of checking a batch of sale lines against current stock
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockCheck {
    pub product_error: Option<StockIssue>,
    pub quantity_error: Option<StockIssue>,
    /// One entry per line, in the order the lookups completed
    pub products: Vec<Option<Product>>,
}

impl StockCheck {
    /// Quantity problems win over missing products
    pub fn verdict(&self) -> AppResult<()> {
        if let Some(issue) = self.quantity_error {
            return Err(issue.into());
        }
        if let Some(issue) = self.product_error {
            return Err(issue.into());
        }
        Ok(())
    }

    /// Stock left for each distinct product once every line is sold.
    ///
    /// Lines naming the same product are summed, so a batch that only fits
    /// line by line is still refused.
    pub fn remaining_stock(&self, lines: &[SaleLine]) -> AppResult<BTreeMap<i64, i64>> {
        let stock: HashMap<i64, i64> = self
            .products
            .iter()
            .flatten()
            .map(|p| (p.id, p.quantity))
            .collect();

        let mut remaining = BTreeMap::new();
        for (product_id, sold) in sold_per_product(lines)? {
            let available = stock
                .get(&product_id)
                .copied()
                .ok_or_else(AppError::product_not_found)?;
            let left = available
                .checked_sub(sold)
                .filter(|left| *left >= 0)
                .ok_or_else(AppError::amount_not_permitted)?;
            remaining.insert(product_id, left);
        }

        Ok(remaining)
    }
}

/// Total requested quantity per product. A total past `i64::MAX` can never
/// be in stock and is refused as such.
pub fn sold_per_product(lines: &[SaleLine]) -> AppResult<BTreeMap<i64, i64>> {
    let mut totals = BTreeMap::new();
    for line in lines {
        let total = totals.entry(line.product_id).or_insert(0i64);
        *total = total
            .checked_add(line.quantity)
            .ok_or_else(AppError::amount_not_permitted)?;
    }
    Ok(totals)
}

/// Look up every product referenced by `lines` concurrently and record
/// whether the sale can go ahead. Read-only.
///
/// When several lines fail the same way, the last one observed is kept.
pub async fn check_stock(products: &dyn ProductStore, lines: &[SaleLine]) -> AppResult<StockCheck> {
    let mut lookups: FuturesUnordered<_> = lines
        .iter()
        .map(|line| async move {
            let product = products.get_by_id(line.product_id).await?;
            Ok::<_, AppError>((line, product))
        })
        .collect();

    let mut check = StockCheck::default();
    while let Some(lookup) = lookups.next().await {
        let (line, product) = lookup?;

        match &product {
            None => check.product_error = Some(StockIssue::ProductNotFound),
            Some(p) if line.quantity > p.quantity => {
                check.quantity_error = Some(StockIssue::InsufficientStock)
            }
            Some(_) => {}
        }

        check.products.push(product);
    }

    tracing::debug!(
        lines = lines.len(),
        product_error = ?check.product_error,
        quantity_error = ?check.quantity_error,
        "Stock check finished"
    );

    Ok(check)
}

/// New stock for a product whose sale line moves from `previous` to
/// `requested` units. `None` when the stock would go negative or past
/// `i64::MAX`.
pub fn restocked_quantity(stock: i64, requested: i64, previous: i64) -> Option<i64> {
    let new_quantity = if requested <= previous {
        stock.checked_add(previous.checked_sub(requested)?)?
    } else {
        stock.checked_sub(requested.checked_sub(previous)?)?
    };

    (new_quantity >= 0).then_some(new_quantity)
}

/// Fetch current stock and compute the quantity to persist for a sale line
/// update. Nothing is written here.
pub async fn compute_delta(
    products: &dyn ProductStore,
    product_id: i64,
    requested: i64,
    previous: i64,
) -> AppResult<i64> {
    let product = products
        .get_by_id(product_id)
        .await?
        .ok_or_else(AppError::product_not_found)?;

    restocked_quantity(product.quantity, requested, previous)
        .ok_or_else(AppError::amount_not_permitted)
}
