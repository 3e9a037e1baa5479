//! Quote Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use swatch::quotes::Mutation;
use swatch_app::domain::{
    catalog::models::{Color, Product, Size},
    quotes::QuoteLine,
};

/// Product summary
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id.into_inner(),
            name: product.name,
            slug: product.slug,
        }
    }
}

/// Color summary
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct ColorResponse {
    pub id: i64,
    pub name: String,
    pub code: String,

    /// Swatch color, e.g. `#F5F0E1`
    pub hex_code: Option<String>,
}

impl From<Color> for ColorResponse {
    fn from(color: Color) -> Self {
        ColorResponse {
            id: color.id.into_inner(),
            name: color.name,
            code: color.code,
            hex_code: color.hex_code,
        }
    }
}

/// Size summary
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct SizeResponse {
    pub id: i64,
    pub name: String,
}

impl From<Size> for SizeResponse {
    fn from(size: Size) -> Self {
        SizeResponse {
            id: size.id.into_inner(),
            name: size.name,
        }
    }
}

/// Quote Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct QuoteItemResponse {
    /// Item key, used to update or remove the item
    pub key: String,
    pub product: ProductResponse,
    pub color: Option<ColorResponse>,
    pub size: Option<SizeResponse>,
    pub quantity: u64,
}

impl From<QuoteLine> for QuoteItemResponse {
    fn from(line: QuoteLine) -> Self {
        QuoteItemResponse {
            key: line.key.to_string(),
            product: line.product.into(),
            color: line.color.map(Into::into),
            size: line.size.map(Into::into),
            quantity: line.quantity.get(),
        }
    }
}

/// Quote Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    pub items: Vec<QuoteItemResponse>,

    /// Number of listed items
    pub count: usize,
}

/// Quote Count Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CountResponse {
    pub count: usize,
}

/// What a quote list change did.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum MutationStatus {
    Inserted,
    Updated,
    Removed,
    Unchanged,
}

impl From<Mutation> for MutationStatus {
    fn from(mutation: Mutation) -> Self {
        match mutation {
            Mutation::Inserted => MutationStatus::Inserted,
            Mutation::Updated => MutationStatus::Updated,
            Mutation::Removed => MutationStatus::Removed,
            Mutation::Unchanged => MutationStatus::Unchanged,
        }
    }
}

/// Quote Item Mutation Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MutationResponse {
    pub key: String,
    pub status: MutationStatus,

    /// Number of listed items after the change
    pub count: usize,
}
