//! Swatch prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    ids::{ColorId, ProductId, SizeId, TypedId},
    items::{ABSENT_TOKEN, ItemKey, LineItem},
    quotes::{Mutation, QUOTE_LIST_SLOT, QuoteError, QuoteList},
    session::{Session, SessionError},
};
