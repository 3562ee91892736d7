#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use shared::{NewProduct, Product, Sale, SaleDetail, SaleEntry, SaleLineItem};
use store_manager::store::{ProductStore, SaleStore};
use store_manager::{AppError, AppResult, AppState};

fn outage() -> AppError {
    AppError::Internal(anyhow::anyhow!("store unavailable"))
}

#[derive(Default)]
pub struct InMemoryProductStore {
    pub map: Mutex<BTreeMap<i64, Product>>,
    /// Every (product_id, quantity) passed to update_quantity
    pub stock_writes: Mutex<Vec<(i64, i64)>>,
    pub fail: AtomicBool,
}

impl InMemoryProductStore {
    pub fn with_products(products: &[(i64, &str, i64)]) -> Arc<Self> {
        let map = products
            .iter()
            .map(|&(id, name, quantity)| {
                (
                    id,
                    Product {
                        id,
                        name: name.to_string(),
                        quantity,
                    },
                )
            })
            .collect();

        Arc::new(Self {
            map: Mutex::new(map),
            ..Default::default()
        })
    }

    pub async fn quantity(&self, id: i64) -> Option<i64> {
        self.map.lock().await.get(&id).map(|p| p.quantity)
    }

    pub async fn writes(&self) -> Vec<(i64, i64)> {
        self.stock_writes.lock().await.clone()
    }

    fn check(&self) -> AppResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(outage());
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn get_all(&self) -> AppResult<Vec<Product>> {
        self.check()?;
        Ok(self.map.lock().await.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        self.check()?;
        // Let concurrent lookups interleave
        tokio::task::yield_now().await;
        Ok(self.map.lock().await.get(&id).cloned())
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Product>> {
        self.check()?;
        Ok(self
            .map
            .lock()
            .await
            .values()
            .filter(|p| p.name.contains(term))
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        self.check()?;
        Ok(self
            .map
            .lock()
            .await
            .values()
            .find(|p| p.name == name)
            .cloned())
    }

    async fn create(&self, product: &NewProduct) -> AppResult<Product> {
        self.check()?;
        let mut map = self.map.lock().await;
        let id = map.keys().next_back().copied().unwrap_or(0) + 1;
        let created = product.clone().into_product(id);
        map.insert(id, created.clone());
        Ok(created)
    }

    async fn update(&self, id: i64, product: &NewProduct) -> AppResult<bool> {
        self.check()?;
        let mut map = self.map.lock().await;
        match map.get_mut(&id) {
            Some(existing) => {
                *existing = product.clone().into_product(id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_quantity(&self, id: i64, quantity: i64) -> AppResult<bool> {
        self.check()?;
        tokio::task::yield_now().await;
        self.stock_writes.lock().await.push((id, quantity));
        let mut map = self.map.lock().await;
        match map.get_mut(&id) {
            Some(product) => {
                product.quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        self.check()?;
        Ok(self.map.lock().await.remove(&id).is_some())
    }

    async fn ping(&self) -> AppResult<()> {
        self.check()
    }
}

#[derive(Default)]
pub struct InMemorySaleStore {
    pub sales: Mutex<BTreeMap<i64, DateTime<Utc>>>,
    /// (sale_id, product_id) -> quantity
    pub lines: Mutex<BTreeMap<(i64, i64), i64>>,
    pub header_fails: AtomicBool,
}

impl InMemorySaleStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed a sale with its lines
    pub async fn with_sale(self: Arc<Self>, sale_id: i64, lines: &[(i64, i64)]) -> Arc<Self> {
        self.sales.lock().await.insert(sale_id, Utc::now());
        let mut stored = self.lines.lock().await;
        for &(product_id, quantity) in lines {
            stored.insert((sale_id, product_id), quantity);
        }
        drop(stored);
        self
    }

    pub async fn line(&self, sale_id: i64, product_id: i64) -> Option<i64> {
        self.lines.lock().await.get(&(sale_id, product_id)).copied()
    }

    pub async fn sale_count(&self) -> usize {
        self.sales.lock().await.len()
    }
}

#[async_trait]
impl SaleStore for InMemorySaleStore {
    async fn get_all(&self) -> AppResult<Vec<SaleEntry>> {
        let sales = self.sales.lock().await;
        let lines = self.lines.lock().await;
        Ok(lines
            .iter()
            .filter_map(|(&(sale_id, product_id), &quantity)| {
                sales.get(&sale_id).map(|&date| SaleEntry {
                    sale_id,
                    date,
                    product_id,
                    quantity,
                })
            })
            .collect())
    }

    async fn get_by_id(&self, sale_id: i64) -> AppResult<Vec<SaleDetail>> {
        let sales = self.sales.lock().await;
        let Some(&date) = sales.get(&sale_id) else {
            return Ok(Vec::new());
        };
        let lines = self.lines.lock().await;
        Ok(lines
            .range((sale_id, i64::MIN)..=(sale_id, i64::MAX))
            .map(|(&(_, product_id), &quantity)| SaleDetail {
                date,
                product_id,
                quantity,
            })
            .collect())
    }

    async fn create_sale_header(&self) -> AppResult<Option<Sale>> {
        if self.header_fails.load(Ordering::SeqCst) {
            return Ok(None);
        }
        let mut sales = self.sales.lock().await;
        let id = sales.keys().next_back().copied().unwrap_or(0) + 1;
        let created_at = Utc::now();
        sales.insert(id, created_at);
        Ok(Some(Sale { id, created_at }))
    }

    async fn create_line_item(&self, sale_id: i64, product_id: i64, quantity: i64) -> AppResult<()> {
        tokio::task::yield_now().await;
        self.lines
            .lock()
            .await
            .insert((sale_id, product_id), quantity);
        Ok(())
    }

    async fn get_line_items(&self, sale_id: i64) -> AppResult<Vec<SaleLineItem>> {
        let lines = self.lines.lock().await;
        Ok(lines
            .range((sale_id, i64::MIN)..=(sale_id, i64::MAX))
            .map(|(&(sale_id, product_id), &quantity)| SaleLineItem {
                sale_id,
                product_id,
                quantity,
            })
            .collect())
    }

    async fn get_line_item(&self, sale_id: i64, product_id: i64) -> AppResult<Option<SaleLineItem>> {
        Ok(self
            .line(sale_id, product_id)
            .await
            .map(|quantity| SaleLineItem {
                sale_id,
                product_id,
                quantity,
            }))
    }

    async fn update_line_item(
        &self,
        sale_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> AppResult<Option<SaleLineItem>> {
        let mut lines = self.lines.lock().await;
        match lines.get_mut(&(sale_id, product_id)) {
            Some(stored) => {
                *stored = quantity;
                Ok(Some(SaleLineItem {
                    sale_id,
                    product_id,
                    quantity,
                }))
            }
            None => Ok(None),
        }
    }

    async fn delete_sale_header(&self, sale_id: i64) -> AppResult<bool> {
        let removed = self.sales.lock().await.remove(&sale_id).is_some();
        if removed {
            self.lines
                .lock()
                .await
                .retain(|&(line_sale_id, _), _| line_sale_id != sale_id);
        }
        Ok(removed)
    }
}

pub fn app_state(products: &Arc<InMemoryProductStore>, sales: &Arc<InMemorySaleStore>) -> AppState {
    AppState::new(products.clone(), sales.clone())
}
