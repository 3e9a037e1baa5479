//! Session store errors.

use sqlx::Error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("storage error")]
    Sql(#[from] Error),
}
