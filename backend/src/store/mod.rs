//! Persistence boundary for products and sales
//!
//! The services only see these traits; `postgres` provides the sqlx-backed
//! implementation used by the server.

use async_trait::async_trait;
use shared::{NewProduct, Product, Sale, SaleDetail, SaleEntry, SaleLineItem};

use crate::error::AppResult;

pub mod postgres;

pub use postgres::{PgProductStore, PgSaleStore};

#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<Product>>;

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Product>>;

    /// Products whose name contains `term`
    async fn search(&self, term: &str) -> AppResult<Vec<Product>>;

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>>;

    async fn create(&self, product: &NewProduct) -> AppResult<Product>;

    /// Returns false when no product has this id
    async fn update(&self, id: i64, product: &NewProduct) -> AppResult<bool>;

    /// Overwrite the stock of a product. Returns false when no row changed.
    async fn update_quantity(&self, id: i64, quantity: i64) -> AppResult<bool>;

    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Connectivity probe for the health endpoint
    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
pub trait SaleStore: Send + Sync {
    async fn get_all(&self) -> AppResult<Vec<SaleEntry>>;

    async fn get_by_id(&self, sale_id: i64) -> AppResult<Vec<SaleDetail>>;

    /// Insert a sale header stamped with the current time
    async fn create_sale_header(&self) -> AppResult<Option<Sale>>;

    async fn create_line_item(&self, sale_id: i64, product_id: i64, quantity: i64) -> AppResult<()>;

    async fn get_line_items(&self, sale_id: i64) -> AppResult<Vec<SaleLineItem>>;

    async fn get_line_item(&self, sale_id: i64, product_id: i64) -> AppResult<Option<SaleLineItem>>;

    async fn update_line_item(
        &self,
        sale_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> AppResult<Option<SaleLineItem>>;

    /// Delete a sale header; its line items go with it
    async fn delete_sale_header(&self, sale_id: i64) -> AppResult<bool>;
}
