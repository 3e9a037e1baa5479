//! Quote Resolution
//!
//! Turns stored line items back into catalog entities. Entries whose product,
//! color or size no longer exists are pruned from the list as they are met.

use std::num::NonZeroU64;

use tracing::debug;

use swatch::{
    items::{ItemKey, LineItem},
    quotes::QuoteList,
};

use crate::domain::{
    catalog::{
        CatalogService, CatalogServiceError,
        models::{Color, Product, Size},
    },
    quotes::errors::ResolveError,
};

/// A line item with its catalog entities loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteLine {
    pub key: ItemKey,
    pub product: Product,
    pub color: Option<Color>,
    pub size: Option<Size>,
    pub quantity: NonZeroU64,
}

/// Outcome of resolving a single line item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(QuoteLine),

    /// Something the line refers to is gone from the catalog.
    Stale,
}

/// Resolved lines plus how many stale entries were dropped to get them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Healed {
    pub lines: Vec<QuoteLine>,
    pub pruned: usize,
}

/// Resolve the line stored under `key`.
///
/// # Errors
///
/// Returns an error for catalog failures other than a missing entity.
pub async fn resolve(
    catalog: &dyn CatalogService,
    key: &ItemKey,
    line: &LineItem,
) -> Result<Resolution, CatalogServiceError> {
    let Some(product) = found(catalog.get_product(line.product_id).await)? else {
        return Ok(Resolution::Stale);
    };

    let color = match line.color_id {
        Some(color) => match found(catalog.get_color(color).await)? {
            Some(color) => Some(color),
            None => return Ok(Resolution::Stale),
        },
        None => None,
    };

    let size = match line.size_id {
        Some(size) => match found(catalog.get_size(size).await)? {
            Some(size) => Some(size),
            None => return Ok(Resolution::Stale),
        },
        None => None,
    };

    Ok(Resolution::Resolved(QuoteLine {
        key: key.clone(),
        product,
        color,
        size,
        quantity: line.quantity,
    }))
}

/// Resolve every listed item, pruning the stale ones from `list`.
///
/// # Errors
///
/// Returns an error when the catalog fails or the pruned list cannot be
/// saved. Nothing is pruned when the catalog fails part way through.
pub async fn heal(
    catalog: &dyn CatalogService,
    list: &mut QuoteList<'_>,
) -> Result<Healed, ResolveError> {
    let mut lines = Vec::with_capacity(list.len());
    let mut stale = Vec::new();

    for key in list.keys() {
        let Some(line) = list.get(key.as_str()).copied() else {
            continue;
        };

        match resolve(catalog, &key, &line).await? {
            Resolution::Resolved(resolved) => lines.push(resolved),
            Resolution::Stale => stale.push(key),
        }
    }

    let pruned = list.reconcile(stale)?;

    if pruned > 0 {
        debug!(pruned, "pruned stale quote items");
    }

    Ok(Healed { lines, pruned })
}

/// The resolvable items of `list`, in key order.
///
/// # Errors
///
/// See [`heal`].
pub async fn items(
    catalog: &dyn CatalogService,
    list: &mut QuoteList<'_>,
) -> Result<Vec<QuoteLine>, ResolveError> {
    Ok(heal(catalog, list).await?.lines)
}

/// Prune stale items from `list` without keeping the resolved views.
///
/// # Errors
///
/// See [`heal`].
pub async fn reconcile(
    catalog: &dyn CatalogService,
    list: &mut QuoteList<'_>,
) -> Result<usize, ResolveError> {
    Ok(heal(catalog, list).await?.pruned)
}

fn found<T>(result: Result<T, CatalogServiceError>) -> Result<Option<T>, CatalogServiceError> {
    match result {
        Ok(entity) => Ok(Some(entity)),
        Err(CatalogServiceError::NotFound) => Ok(None),
        Err(error) => Err(error),
    }
}
