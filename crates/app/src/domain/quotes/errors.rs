//! Quote errors.

use thiserror::Error;

use swatch::quotes::QuoteError;

use crate::{domain::catalog::CatalogServiceError, notifications::NotifierError};

/// Errors resolving quote lines against the catalog.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("catalog lookup failed")]
    Catalog(#[from] CatalogServiceError),

    #[error(transparent)]
    Quote(#[from] QuoteError),
}

/// Reasons contact details are refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("name is required")]
    NameRequired,

    #[error("email is required")]
    EmailRequired,

    #[error("email address is invalid")]
    EmailInvalid,
}

/// Errors submitting a quote request.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("invalid contact details: {0}")]
    InvalidContact(#[from] ContactError),

    #[error("quote list is empty")]
    EmptyQuote,

    #[error("failed to resolve quote items")]
    Resolve(#[from] ResolveError),

    #[error("failed to dispatch quote request")]
    Dispatch(#[from] NotifierError),

    #[error(transparent)]
    Quote(#[from] QuoteError),
}
