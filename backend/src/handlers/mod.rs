//! HTTP handlers for the Store Manager API

mod health;
mod products;
mod sales;

pub use health::*;
pub use products::*;
pub use sales::*;
