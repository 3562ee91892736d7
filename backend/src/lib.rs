//! Store Manager API
//!
//! Products and sales over PostgreSQL, keeping product stock consistent as
//! sales are created, updated and deleted.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod handlers;
pub mod reply;
pub mod routes;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use reply::Reply;

use services::{ProductsService, SalesService};
use store::{ProductStore, SaleStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub products: ProductsService,
    pub sales: SalesService,
}

impl AppState {
    /// Wire the services onto the given stores
    pub fn new(products: Arc<dyn ProductStore>, sales: Arc<dyn SaleStore>) -> Self {
        let sales = SalesService::new(products.clone(), sales);
        let products = ProductsService::new(products).with_inventory_guard(sales.inventory_guard());

        Self { products, sales }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Store Manager API v1.0"
}
