//! PostgreSQL implementations of the store traits

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{NewProduct, Product, Sale, SaleDetail, SaleEntry, SaleLineItem};
use sqlx::{FromRow, PgPool};

use super::{ProductStore, SaleStore};
use crate::error::AppResult;

/// Product table access
#[derive(Clone)]
pub struct PgProductStore {
    db: PgPool,
}

/// Sales and sales_products table access
#[derive(Clone)]
pub struct PgSaleStore {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    quantity: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
        }
    }
}

#[derive(Debug, FromRow)]
struct SaleRow {
    id: i64,
    date: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct SaleEntryRow {
    sale_id: i64,
    date: DateTime<Utc>,
    product_id: i64,
    quantity: i64,
}

#[derive(Debug, FromRow)]
struct SaleDetailRow {
    date: DateTime<Utc>,
    product_id: i64,
    quantity: i64,
}

#[derive(Debug, FromRow)]
struct LineItemRow {
    sale_id: i64,
    product_id: i64,
    quantity: i64,
}

impl From<LineItemRow> for SaleLineItem {
    fn from(row: LineItemRow) -> Self {
        SaleLineItem {
            sale_id: row.sale_id,
            product_id: row.product_id,
            quantity: row.quantity,
        }
    }
}

impl PgProductStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl PgSaleStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn get_all(&self) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, quantity FROM products ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn get_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, quantity FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, quantity FROM products WHERE name LIKE '%' || $1 || '%' ORDER BY id",
        )
        .bind(term)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, quantity FROM products WHERE name = $1 LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(Product::from))
    }

    async fn create(&self, product: &NewProduct) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            INSERT INTO products (name, quantity)
            VALUES ($1, $2)
            RETURNING id, name, quantity
            "#,
        )
        .bind(&product.name)
        .bind(product.quantity)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, product: &NewProduct) -> AppResult<bool> {
        let result = sqlx::query("UPDATE products SET name = $1, quantity = $2 WHERE id = $3")
            .bind(&product.name)
            .bind(product.quantity)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_quantity(&self, id: i64, quantity: i64) -> AppResult<bool> {
        let result = sqlx::query("UPDATE products SET quantity = $1 WHERE id = $2")
            .bind(quantity)
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}

#[async_trait]
impl SaleStore for PgSaleStore {
    async fn get_all(&self) -> AppResult<Vec<SaleEntry>> {
        let rows = sqlx::query_as::<_, SaleEntryRow>(
            r#"
            SELECT sp.sale_id, s.date, sp.product_id, sp.quantity
            FROM sales_products sp
            INNER JOIN sales s ON s.id = sp.sale_id
            ORDER BY sp.sale_id, sp.product_id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SaleEntry {
                sale_id: r.sale_id,
                date: r.date,
                product_id: r.product_id,
                quantity: r.quantity,
            })
            .collect())
    }

    async fn get_by_id(&self, sale_id: i64) -> AppResult<Vec<SaleDetail>> {
        let rows = sqlx::query_as::<_, SaleDetailRow>(
            r#"
            SELECT s.date, sp.product_id, sp.quantity
            FROM sales_products sp
            INNER JOIN sales s ON s.id = sp.sale_id
            WHERE sp.sale_id = $1
            ORDER BY sp.product_id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SaleDetail {
                date: r.date,
                product_id: r.product_id,
                quantity: r.quantity,
            })
            .collect())
    }

    async fn create_sale_header(&self) -> AppResult<Option<Sale>> {
        let row = sqlx::query_as::<_, SaleRow>(
            "INSERT INTO sales (date) VALUES (now()) RETURNING id, date",
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(|r| Sale {
            id: r.id,
            created_at: r.date,
        }))
    }

    async fn create_line_item(&self, sale_id: i64, product_id: i64, quantity: i64) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO sales_products (sale_id, product_id, quantity) VALUES ($1, $2, $3)",
        )
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn get_line_items(&self, sale_id: i64) -> AppResult<Vec<SaleLineItem>> {
        let rows = sqlx::query_as::<_, LineItemRow>(
            r#"
            SELECT sale_id, product_id, quantity
            FROM sales_products
            WHERE sale_id = $1
            ORDER BY product_id
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(SaleLineItem::from).collect())
    }

    async fn get_line_item(&self, sale_id: i64, product_id: i64) -> AppResult<Option<SaleLineItem>> {
        let row = sqlx::query_as::<_, LineItemRow>(
            r#"
            SELECT sale_id, product_id, quantity
            FROM sales_products
            WHERE sale_id = $1 AND product_id = $2
            "#,
        )
        .bind(sale_id)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(SaleLineItem::from))
    }

    async fn update_line_item(
        &self,
        sale_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> AppResult<Option<SaleLineItem>> {
        let row = sqlx::query_as::<_, LineItemRow>(
            r#"
            UPDATE sales_products
            SET quantity = $1
            WHERE sale_id = $2 AND product_id = $3
            RETURNING sale_id, product_id, quantity
            "#,
        )
        .bind(quantity)
        .bind(sale_id)
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(SaleLineItem::from))
    }

    async fn delete_sale_header(&self, sale_id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(sale_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
