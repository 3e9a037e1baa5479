//! App Context

use std::sync::Arc;

use clap::ValueEnum;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        catalog::{CatalogService, PgCatalogService},
        sessions::{MemorySessionStore, PgSessionStore, SessionStore},
    },
    notifications::{HttpMailer, HttpMailerConfig, Notifier, NotifierError},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to build mail relay client")]
    Mailer(#[source] NotifierError),
}

/// Where visitor sessions are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum SessionBackend {
    /// The `sessions` table.
    #[default]
    Postgres,

    /// Process memory; sessions are lost on restart.
    Memory,
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub sessions: Arc<dyn SessionStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or building
    /// the mail relay client fails.
    pub async fn from_database_url(
        url: &str,
        sessions: SessionBackend,
        mailer: HttpMailerConfig,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let sessions: Arc<dyn SessionStore> = match sessions {
            SessionBackend::Postgres => Arc::new(PgSessionStore::new(pool.clone())),
            SessionBackend::Memory => Arc::new(MemorySessionStore::new()),
        };

        let notifier = HttpMailer::new(mailer).map_err(AppInitError::Mailer)?;

        Ok(Self {
            catalog: Arc::new(PgCatalogService::new(Db::new(pool))),
            sessions,
            notifier: Arc::new(notifier),
        })
    }
}
