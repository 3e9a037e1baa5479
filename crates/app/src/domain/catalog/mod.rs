//! Catalog

pub mod errors;
pub mod models;
mod repository;
pub mod service;
pub mod variants;

pub use errors::CatalogServiceError;
pub use service::*;
pub use variants::VariantError;
