//! Domain models for the Store Manager API

mod product;
mod sale;

pub use product::*;
pub use sale::*;
