//! Add Quote Item Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use swatch::{
    ids::{ColorId, ProductId, SizeId},
    items::ItemKey,
    quotes::{Mutation, QuoteList},
};

use crate::{
    extensions::*,
    observability::record_items_added,
    quotes::{
        errors::{catalog_status_error, variant_status_error},
        models::MutationResponse,
    },
    state::State,
};

/// Add Quote Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    pub product_id: i64,

    /// Required when the product's category is sold by color
    #[serde(default)]
    pub color_id: Option<i64>,

    /// Required when the product's category is sold by size
    #[serde(default)]
    pub size_id: Option<i64>,

    /// Replaces any quantity already listed; zero or less removes the item
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Add Quote Item Handler
#[endpoint(
    tags("quotes"),
    summary = "Add Item to Quote",
    responses(
        (status_code = StatusCode::CREATED, description = "Quote item added"),
        (status_code = StatusCode::OK, description = "Quote item quantity replaced"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "quotes.add",
    skip(json, depot, res),
    fields(
        product_id = tracing::field::Empty,
        color_id = tracing::field::Empty,
        size_id = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MutationResponse>, StatusError> {
    let state = Arc::clone(depot.obtain_or_500::<Arc<State>>()?);
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("product_id", request.product_id);
    span.record("color_id", tracing::field::debug(request.color_id));
    span.record("size_id", tracing::field::debug(request.size_id));
    span.record("quantity", request.quantity);

    let product = ProductId::new(request.product_id);
    let color = request.color_id.map(ColorId::new);
    let size = request.size_id.map(SizeId::new);

    state
        .app
        .catalog
        .product_offers(product)
        .await
        .map_err(catalog_status_error)?
        .validate(color, size)
        .map_err(variant_status_error)?;

    let session = depot.session_mut_or_500()?;
    let mut list = QuoteList::new(session).or_500("failed to open quote list")?;

    let mutation = list
        .add(product, request.quantity, color, size)
        .or_500("failed to add quote item")?;

    let key = ItemKey::of(product, color, size);

    if matches!(mutation, Mutation::Inserted | Mutation::Updated) {
        record_items_added(1);
    }

    if mutation == Mutation::Inserted {
        res.add_header(LOCATION, format!("/quote/items/{key}"), true)
            .or_500("failed to set location header")?
            .status_code(StatusCode::CREATED);
    }

    tracing::info!(key = %key, ?mutation, "added quote item");

    Ok(Json(MutationResponse {
        key: key.to_string(),
        status: mutation.into(),
        count: list.len(),
    }))
}
