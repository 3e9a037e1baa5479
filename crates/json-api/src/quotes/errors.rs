//! Quote Errors

use salvo::http::StatusError;
use tracing::error;

use swatch_app::domain::{
    catalog::{CatalogServiceError, VariantError},
    quotes::{ResolveError, SubmissionError},
};

pub(crate) fn catalog_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound => StatusError::not_found().brief("Product not found"),
        CatalogServiceError::Sql(source) => {
            error!("catalog lookup failed: {source}");

            StatusError::internal_server_error()
        }
    }
}

pub(crate) fn variant_status_error(error: VariantError) -> StatusError {
    StatusError::bad_request().brief(error.to_string())
}

pub(crate) fn resolve_status_error(error: ResolveError) -> StatusError {
    error!("failed to resolve quote items: {error}");

    StatusError::internal_server_error()
}

pub(crate) fn submission_status_error(error: SubmissionError) -> StatusError {
    match error {
        SubmissionError::InvalidContact(reason) => {
            StatusError::bad_request().brief(reason.to_string())
        }
        SubmissionError::EmptyQuote => {
            StatusError::bad_request().brief("There are no items in your quote")
        }
        SubmissionError::Dispatch(source) => {
            error!("quote request dispatch failed: {source}");

            StatusError::bad_gateway().brief("Failed to send quote request, please try again")
        }
        SubmissionError::Resolve(source) => resolve_status_error(source),
        SubmissionError::Quote(source) => {
            error!("failed to update quote list: {source}");

            StatusError::internal_server_error()
        }
    }
}
