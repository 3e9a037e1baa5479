//! Quote List
//!
//! The quote list is a cart-like collection of requested line items kept in a
//! single [`Session`] slot. It stores identifiers only: turning them back into
//! catalog entities, and pruning the ones that no longer resolve, is left to
//! the caller via [`QuoteList::keys`] and [`QuoteList::reconcile`].

use std::collections::BTreeMap;

use thiserror::Error;

use crate::{
    ids::{ColorId, ProductId, SizeId},
    items::{ItemKey, LineItem, positive_quantity},
    session::{Session, SessionError},
};

/// Session slot holding the quote list.
pub const QUOTE_LIST_SLOT: &str = "quote_list";

type Lines = BTreeMap<ItemKey, LineItem>;

/// Errors persisting the quote list.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The session rejected the encoded list.
    #[error("failed to store quote list in session")]
    Session(#[from] SessionError),
}

/// Outcome of a single quote list mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// A new line was stored.
    Inserted,

    /// An existing line's quantity was replaced.
    Updated,

    /// A line was dropped.
    Removed,

    /// Nothing changed.
    Unchanged,
}

/// Session-backed list of requested line items.
#[derive(Debug)]
pub struct QuoteList<'s> {
    session: &'s mut Session,
    lines: Lines,
}

impl<'s> QuoteList<'s> {
    /// Open the quote list stored in `session`, initialising an empty one if
    /// the slot is missing or unreadable.
    ///
    /// Stored lines whose key does not match their own product/color/size are
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns an error when the (re)initialised list cannot be written back.
    pub fn new(session: &'s mut Session) -> Result<Self, QuoteError> {
        let (lines, dirty) = match session.get::<Lines>(QUOTE_LIST_SLOT) {
            Ok(Some(stored)) => {
                let count = stored.len();
                let lines: Lines = stored
                    .into_iter()
                    .filter(|(key, line)| *key == line.key())
                    .collect();
                let dirty = lines.len() != count;

                (lines, dirty)
            }
            Ok(None) | Err(SessionError::Encoding(..)) => (Lines::new(), true),
        };

        let mut list = Self { session, lines };

        if dirty {
            list.save()?;
        }

        Ok(list)
    }

    /// Add a product, with optional color and size, at `quantity`.
    ///
    /// Adding a combination that is already listed replaces its quantity. A
    /// zero or negative quantity removes the combination instead of storing it.
    ///
    /// # Errors
    ///
    /// Returns an error when the list cannot be written to the session.
    pub fn add(
        &mut self,
        product: ProductId,
        quantity: i64,
        color: Option<ColorId>,
        size: Option<SizeId>,
    ) -> Result<Mutation, QuoteError> {
        let key = ItemKey::of(product, color, size);

        let Some(quantity) = positive_quantity(quantity) else {
            return self.remove(key.as_str()).map(removed_or_unchanged);
        };

        let line = LineItem {
            product_id: product,
            color_id: color,
            size_id: size,
            quantity,
        };

        let mutation = match self.lines.insert(key, line) {
            Some(_) => Mutation::Updated,
            None => Mutation::Inserted,
        };

        self.save()?;

        Ok(mutation)
    }

    /// Set the quantity of the line stored under `key`.
    ///
    /// Unknown keys are ignored; a zero or negative quantity removes the line.
    ///
    /// # Errors
    ///
    /// Returns an error when the list cannot be written to the session.
    pub fn update(&mut self, key: &str, quantity: i64) -> Result<Mutation, QuoteError> {
        let Some(quantity) = positive_quantity(quantity) else {
            return self.remove(key).map(removed_or_unchanged);
        };

        let Some(line) = self.lines.get_mut(key) else {
            return Ok(Mutation::Unchanged);
        };

        line.quantity = quantity;

        self.save()?;

        Ok(Mutation::Updated)
    }

    /// Remove the line stored under `key`, returning whether it was present.
    ///
    /// # Errors
    ///
    /// Returns an error when the list cannot be written to the session.
    pub fn remove(&mut self, key: &str) -> Result<bool, QuoteError> {
        if self.lines.remove(key).is_none() {
            return Ok(false);
        }

        self.save()?;

        Ok(true)
    }

    /// Remove every key in `stale`, returning how many were present.
    ///
    /// # Errors
    ///
    /// Returns an error when the list cannot be written to the session.
    pub fn reconcile<I>(&mut self, stale: I) -> Result<usize, QuoteError>
    where
        I: IntoIterator<Item = ItemKey>,
    {
        let mut removed = 0;

        for key in stale {
            if self.lines.remove(&key).is_some() {
                removed += 1;
            }
        }

        if removed > 0 {
            self.save()?;
        }

        Ok(removed)
    }

    /// Snapshot of the keys currently listed.
    #[must_use]
    pub fn keys(&self) -> Vec<ItemKey> {
        self.lines.keys().cloned().collect()
    }

    /// The line stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LineItem> {
        self.lines.get(key)
    }

    /// Iterate over the stored lines in key order.
    pub fn lines(&self) -> impl Iterator<Item = (&ItemKey, &LineItem)> {
        self.lines.iter()
    }

    /// Number of stored lines, whether or not they still resolve.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the list holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Delete the quote list slot from the session altogether.
    pub fn clear(self) {
        self.session.remove(QUOTE_LIST_SLOT);
    }

    fn save(&mut self) -> Result<(), QuoteError> {
        self.session.insert(QUOTE_LIST_SLOT, &self.lines)?;

        Ok(())
    }
}

fn removed_or_unchanged(removed: bool) -> Mutation {
    if removed {
        Mutation::Removed
    } else {
        Mutation::Unchanged
    }
}
