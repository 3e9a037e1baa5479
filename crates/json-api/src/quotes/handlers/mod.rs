//! Quote Handlers

use salvo::prelude::StatusError;

use swatch::{
    quotes::{QUOTE_LIST_SLOT, QuoteList},
    session::Session,
};

use crate::extensions::*;

pub(crate) mod add;
pub(crate) mod count;
pub(crate) mod index;
pub(crate) mod remove;
pub(crate) mod submit;
pub(crate) mod update;

/// Open the visitor's quote list, or `None` when they never started one.
///
/// Read-only and no-op requests go through here so that they do not create a
/// session just to hold an empty list.
fn existing_list(session: &mut Session) -> Result<Option<QuoteList<'_>>, StatusError> {
    if !session.contains(QUOTE_LIST_SLOT) {
        return Ok(None);
    }

    QuoteList::new(session)
        .map(Some)
        .or_500("failed to open quote list")
}
