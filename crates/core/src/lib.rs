//! Swatch
//!
//! Session-scoped quote request lists for a paint catalog: typed catalog ids,
//! line item keys, the session slot abstraction and the [`quotes::QuoteList`]
//! itself. Nothing in this crate performs I/O.

pub mod ids;
pub mod items;
pub mod prelude;
pub mod quotes;
pub mod session;
