//! Variant Validation
//!
//! A product's category decides whether it is requested per color and per
//! size. Where a dimension is featured a value is required and must be one the
//! product is offered in; where it is not, no value may be given.

use thiserror::Error;

use swatch::ids::{ColorId, SizeId};

use crate::domain::catalog::models::ProductOffers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VariantError {
    #[error("a color must be chosen for this product")]
    ColorRequired,

    #[error("this product is not offered in the chosen color")]
    ColorUnavailable,

    #[error("this product is not sold by color")]
    ColorNotApplicable,

    #[error("a size must be chosen for this product")]
    SizeRequired,

    #[error("this product is not offered in the chosen size")]
    SizeUnavailable,

    #[error("this product is not sold by size")]
    SizeNotApplicable,
}

impl ProductOffers {
    /// Check that `color` and `size` form a valid request for this product.
    ///
    /// # Errors
    ///
    /// Returns the first dimension that is missing, unavailable or not
    /// applicable.
    pub fn validate(&self, color: Option<ColorId>, size: Option<SizeId>) -> Result<(), VariantError> {
        let category = &self.product.category;

        match (category.features_colors, color) {
            (true, None) => return Err(VariantError::ColorRequired),
            (true, Some(color)) if !self.available_colors.contains(&color) => {
                return Err(VariantError::ColorUnavailable);
            }
            (false, Some(_)) => return Err(VariantError::ColorNotApplicable),
            _ => {}
        }

        match (category.features_sizes, size) {
            (true, None) => Err(VariantError::SizeRequired),
            (true, Some(size)) if !self.available_sizes.contains(&size) => {
                Err(VariantError::SizeUnavailable)
            }
            (false, Some(_)) => Err(VariantError::SizeNotApplicable),
            _ => Ok(()),
        }
    }
}
