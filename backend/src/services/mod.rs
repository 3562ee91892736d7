//! Business logic services for the Store Manager API

pub mod inventory;
pub mod products;
pub mod sales;

pub use products::ProductsService;
pub use sales::SalesService;
