//! Quotes
//!
//! Catalog-aware operations over a visitor's [`swatch::quotes::QuoteList`].

pub mod errors;
pub mod resolve;
pub mod submission;
pub mod summary;

pub use errors::{ContactError, ResolveError, SubmissionError};
pub use resolve::{Healed, QuoteLine, Resolution, heal, items, reconcile, resolve};
pub use submission::{ContactDetails, QuoteSubmitter, Receipt, SubmissionSettings};
