//! Catalog Models

use swatch::ids::{ColorId, ProductId, SizeId};

/// Category Identifier
pub type CategoryId = i64;

/// Category Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,

    /// Products in this category are requested in a specific color.
    pub features_colors: bool,

    /// Products in this category are requested in a specific size.
    pub features_sizes: bool,
}

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub category: Category,
    pub is_active: bool,
}

/// Color Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
    pub code: String,
    pub hex_code: Option<String>,
}

/// Size Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Size {
    pub id: SizeId,
    pub name: String,
}

/// A product together with the variants it can be requested in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductOffers {
    pub product: Product,
    pub available_colors: Vec<ColorId>,
    pub available_sizes: Vec<SizeId>,
}
