//! Sessions

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::SessionStoreError;
pub use models::SessionId;
pub use service::*;
