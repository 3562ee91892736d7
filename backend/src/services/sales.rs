//! Sale lifecycle: creating, updating and deleting sales while keeping
//! product stock consistent

use std::sync::Arc;

use futures::future::try_join_all;
use shared::{CreatedSale, SaleDetail, SaleEntry, SaleLine, SaleLineItem, UpdatedSale};
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult, SALES_NOT_FOUND, SALE_NOT_FOUND};
use crate::reply::Reply;
use crate::services::inventory;
use crate::store::{ProductStore, SaleStore};

/// Sales service. Stock-changing operations are serialized through the
/// inventory guard so a stock check and the write that follows it cannot
/// interleave with another sale in this process. `AppState` hands the same
/// guard to `ProductsService` so catalogue edits are serialized too.
#[derive(Clone)]
pub struct SalesService {
    products: Arc<dyn ProductStore>,
    sales: Arc<dyn SaleStore>,
    inventory_guard: Arc<Mutex<()>>,
}

impl SalesService {
    /// Create a new SalesService instance
    pub fn new(products: Arc<dyn ProductStore>, sales: Arc<dyn SaleStore>) -> Self {
        Self {
            products,
            sales,
            inventory_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Guard shared with every service that writes stock
    pub fn inventory_guard(&self) -> Arc<Mutex<()>> {
        self.inventory_guard.clone()
    }

    /// List every sale line with its sale date
    pub async fn get_all(&self) -> AppResult<Reply<Vec<SaleEntry>>> {
        let entries = self.sales.get_all().await?;

        if entries.is_empty() {
            return Err(AppError::NotFound(SALES_NOT_FOUND.to_string()));
        }

        Ok(Reply::Ok(entries))
    }

    /// Get the lines of a single sale
    pub async fn get_by_id(&self, sale_id: i64) -> AppResult<Reply<Vec<SaleDetail>>> {
        let details = self.sales.get_by_id(sale_id).await?;

        if details.is_empty() {
            return Err(AppError::NotFound(SALE_NOT_FOUND.to_string()));
        }

        Ok(Reply::Ok(details))
    }

    /// Register a sale and withdraw the sold units from stock
    pub async fn create(&self, lines: Vec<SaleLine>) -> AppResult<Reply<CreatedSale>> {
        if lines.is_empty() {
            return Err(AppError::bad_request());
        }

        let _guard = self.inventory_guard.lock().await;

        let check = inventory::check_stock(self.products.as_ref(), &lines).await?;
        check.verdict()?;
        let remaining = check.remaining_stock(&lines)?;

        let sale = self
            .sales
            .create_sale_header()
            .await?
            .ok_or_else(AppError::bad_request)?;
        let sale_id = sale.id;

        // Lines for the same product share one stock write and one line item
        let sold = inventory::sold_per_product(&lines)?;
        let writes = remaining.iter().map(|(&product_id, &left)| {
            let quantity = sold.get(&product_id).copied().unwrap_or_default();
            async move {
                self.write_stock(product_id, left).await?;
                self.sales
                    .create_line_item(sale_id, product_id, quantity)
                    .await
            }
        });
        try_join_all(writes).await?;

        tracing::info!(sale_id, created_at = %sale.created_at, lines = lines.len(), "Sale created");

        Ok(Reply::Created(CreatedSale {
            id: sale_id,
            items_sold: lines,
        }))
    }

    /// Change the quantity of one line of a sale, moving the difference
    /// into or out of stock
    pub async fn update(&self, sale_id: i64, line: SaleLine) -> AppResult<Reply<UpdatedSale>> {
        let _guard = self.inventory_guard.lock().await;

        let existing = self
            .sales
            .get_line_item(sale_id, line.product_id)
            .await?
            .ok_or_else(AppError::sale_not_found)?;

        let new_stock = inventory::compute_delta(
            self.products.as_ref(),
            line.product_id,
            line.quantity,
            existing.quantity,
        )
        .await?;

        self.write_stock(line.product_id, new_stock).await?;
        self.sales
            .update_line_item(sale_id, line.product_id, line.quantity)
            .await?
            .ok_or_else(AppError::sale_not_found)?;

        tracing::info!(
            sale_id,
            product_id = line.product_id,
            from = existing.quantity,
            to = line.quantity,
            "Sale line updated"
        );

        Ok(Reply::Ok(UpdatedSale {
            sale_id,
            item_updated: vec![line],
        }))
    }

    /// Delete a sale after returning its units to stock
    pub async fn delete(&self, sale_id: i64) -> AppResult<Reply<()>> {
        let _guard = self.inventory_guard.lock().await;

        let items = self.sales.get_line_items(sale_id).await?;
        if items.is_empty() {
            return Err(AppError::sale_not_found());
        }

        // Every target is computed before the first write, so a refused
        // restock leaves stock untouched
        let targets = try_join_all(items.iter().map(|item| self.restock_target(item))).await?;
        try_join_all(
            targets
                .into_iter()
                .flatten()
                .map(|(product_id, quantity)| self.write_stock(product_id, quantity)),
        )
        .await?;

        if !self.sales.delete_sale_header(sale_id).await? {
            return Err(AppError::sale_not_found());
        }

        tracing::info!(sale_id, lines = items.len(), "Sale deleted");

        Ok(Reply::NoContent)
    }

    /// Stock to write back for a deleted line, `None` when the product is gone
    async fn restock_target(&self, item: &SaleLineItem) -> AppResult<Option<(i64, i64)>> {
        match self.products.get_by_id(item.product_id).await? {
            Some(product) => {
                let quantity = product
                    .quantity
                    .checked_add(item.quantity)
                    .ok_or_else(AppError::amount_not_permitted)?;
                Ok(Some((product.id, quantity)))
            }
            None => {
                // Deleting a product removes its sale lines, so this only
                // happens when the product vanished mid-request
                tracing::warn!(
                    sale_id = item.sale_id,
                    product_id = item.product_id,
                    "Product gone, nothing to restock"
                );
                Ok(None)
            }
        }
    }

    async fn write_stock(&self, product_id: i64, quantity: i64) -> AppResult<()> {
        if !self.products.update_quantity(product_id, quantity).await? {
            return Err(AppError::product_not_found());
        }
        Ok(())
    }
}
