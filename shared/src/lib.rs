//! Shared types and models for the Store Manager API
//!
//! This crate contains the domain models and request validation rules used by
//! the backend and its tests.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
