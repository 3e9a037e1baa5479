//! Update Quote Item Handler

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};

use swatch::quotes::Mutation;

use crate::{
    extensions::*,
    quotes::{handlers::existing_list, models::MutationResponse},
};

/// Update Quote Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateItemRequest {
    /// New quantity; zero or less removes the item
    pub quantity: i64,
}

/// Update Quote Item Handler
///
/// Unknown keys are left alone.
#[endpoint(
    tags("quotes"),
    summary = "Update Quote Item Quantity",
    responses(
        (status_code = StatusCode::OK, description = "Quote item updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "quotes.update",
    skip(key, json, depot),
    fields(key = tracing::field::Empty, quantity = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    key: PathParam<String>,
    json: JsonBody<UpdateItemRequest>,
    depot: &mut Depot,
) -> Result<Json<MutationResponse>, StatusError> {
    let key = key.into_inner();
    let quantity = json.into_inner().quantity;

    let span = tracing::Span::current();

    span.record("key", key.as_str());
    span.record("quantity", quantity);

    let session = depot.session_mut_or_500()?;

    let (mutation, count) = match existing_list(session)? {
        Some(mut list) => {
            let mutation = list
                .update(&key, quantity)
                .or_500("failed to update quote item")?;

            (mutation, list.len())
        }
        None => (Mutation::Unchanged, 0),
    };

    tracing::info!(key = %key, ?mutation, "updated quote item");

    Ok(Json(MutationResponse {
        key,
        status: mutation.into(),
        count,
    }))
}
