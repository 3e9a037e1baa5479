//! Swatch Domain Concerns

pub mod catalog;
pub mod quotes;
pub mod sessions;
