//! Line Items

use std::{
    borrow::Borrow,
    fmt::{Display, Formatter, Result as FmtResult},
    num::NonZeroU64,
};

use serde::{Deserialize, Serialize};

use crate::ids::{ColorId, ProductId, SizeId};

/// Token standing in for an absent color or size in an [`ItemKey`].
pub const ABSENT_TOKEN: &str = "none";

/// Composite line item key: `{product}_{color|none}_{size|none}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    /// Derive the key for a product and its optional variant dimensions.
    #[must_use]
    pub fn of(product: ProductId, color: Option<ColorId>, size: Option<SizeId>) -> Self {
        Self(format!(
            "{product}_{}_{}",
            token(color.map(i64::from)),
            token(size.map(i64::from))
        ))
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn token(id: Option<i64>) -> String {
    id.map_or_else(|| ABSENT_TOKEN.to_string(), |id| id.to_string())
}

impl Display for ItemKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A requested product/color/size combination and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Requested product
    pub product_id: ProductId,

    /// Requested color, for products sold in colors
    pub color_id: Option<ColorId>,

    /// Requested size, for products sold in sizes
    pub size_id: Option<SizeId>,

    /// Requested quantity
    pub quantity: NonZeroU64,
}

impl LineItem {
    /// The key this item is stored under.
    #[must_use]
    pub fn key(&self) -> ItemKey {
        ItemKey::of(self.product_id, self.color_id, self.size_id)
    }
}

/// Positive quantity for `quantity`, or `None` when it is zero or negative.
#[must_use]
pub fn positive_quantity(quantity: i64) -> Option<NonZeroU64> {
    u64::try_from(quantity).ok().and_then(NonZeroU64::new)
}
