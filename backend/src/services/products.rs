//! Product catalogue service

use std::sync::Arc;

use shared::{NewProduct, Product};
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult, PRODUCTS_NOT_FOUND, PRODUCT_EXISTS};
use crate::reply::Reply;
use crate::store::ProductStore;

/// Product service for listing and maintaining the catalogue
#[derive(Clone)]
pub struct ProductsService {
    products: Arc<dyn ProductStore>,
    inventory_guard: Arc<Mutex<()>>,
}

impl ProductsService {
    /// Create a new ProductsService instance
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self {
            products,
            inventory_guard: Arc::new(Mutex::new(())),
        }
    }

    /// Serialize stock overwrites with sales holding the same guard
    pub fn with_inventory_guard(mut self, guard: Arc<Mutex<()>>) -> Self {
        self.inventory_guard = guard;
        self
    }

    pub async fn get_all(&self) -> AppResult<Reply<Vec<Product>>> {
        let products = self.products.get_all().await?;

        if products.is_empty() {
            return Err(AppError::NotFound(PRODUCTS_NOT_FOUND.to_string()));
        }

        Ok(Reply::Ok(products))
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Reply<Product>> {
        self.products
            .get_by_id(id)
            .await?
            .map(Reply::Ok)
            .ok_or_else(AppError::product_not_found)
    }

    /// Products whose name contains `term`; an empty term lists everything
    pub async fn search(&self, term: &str) -> AppResult<Reply<Vec<Product>>> {
        let products = if term.is_empty() {
            self.products.get_all().await?
        } else {
            self.products.search(term).await?
        };

        Ok(Reply::Ok(products))
    }

    /// Create a product. Names are unique.
    pub async fn create(&self, input: NewProduct) -> AppResult<Reply<Product>> {
        if self.products.find_by_name(&input.name).await?.is_some() {
            return Err(AppError::Conflict(PRODUCT_EXISTS.to_string()));
        }

        let product = self.products.create(&input).await?;
        tracing::info!(product_id = product.id, name = %product.name, "Product created");

        Ok(Reply::Created(product))
    }

    pub async fn update(&self, id: i64, input: NewProduct) -> AppResult<Reply<Product>> {
        let _guard = self.inventory_guard.lock().await;

        if !self.products.update(id, &input).await? {
            return Err(AppError::product_not_found());
        }

        Ok(Reply::Ok(input.into_product(id)))
    }

    pub async fn delete(&self, id: i64) -> AppResult<Reply<()>> {
        let _guard = self.inventory_guard.lock().await;

        if !self.products.delete(id).await? {
            return Err(AppError::product_not_found());
        }

        tracing::info!(product_id = id, "Product deleted");
        Ok(Reply::NoContent)
    }

    /// Check the backing store is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.products.ping().await
    }
}
