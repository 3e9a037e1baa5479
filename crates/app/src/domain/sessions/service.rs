//! Session stores.

use std::collections::HashMap;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use sqlx::PgPool;
use tokio::sync::RwLock;

use swatch::session::Session;

use crate::domain::sessions::{
    errors::SessionStoreError, models::SessionId, repository::PgSessionsRepository,
};

#[derive(Debug, Clone)]
pub struct PgSessionStore {
    repository: PgSessionsRepository,
}

impl PgSessionStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgSessionsRepository::new(pool),
        }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError> {
        let data = self.repository.load_session(id).await?;

        Ok(data.map(Session::from_data))
    }

    async fn save(
        &self,
        id: &SessionId,
        session: &Session,
        expires_at: Timestamp,
    ) -> Result<(), SessionStoreError> {
        self.repository
            .save_session(id, session.data(), expires_at)
            .await?;

        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.repository.delete_session(id).await?;

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, SessionStoreError> {
        Ok(self.repository.purge_expired().await?)
    }
}

/// Process-local session store for development and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<SessionId, (Session, Timestamp)>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError> {
        let sessions = self.sessions.read().await;

        let session = sessions
            .get(id)
            .filter(|(_, expires_at)| *expires_at > Timestamp::now())
            .map(|(session, _)| Session::from_data(session.data().clone()));

        Ok(session)
    }

    async fn save(
        &self,
        id: &SessionId,
        session: &Session,
        expires_at: Timestamp,
    ) -> Result<(), SessionStoreError> {
        let stored = Session::from_data(session.data().clone());

        self.sessions
            .write()
            .await
            .insert(id.clone(), (stored, expires_at));

        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError> {
        self.sessions.write().await.remove(id);

        Ok(())
    }

    async fn purge_expired(&self) -> Result<u64, SessionStoreError> {
        let now = Timestamp::now();
        let mut sessions = self.sessions.write().await;

        let before = sessions.len();

        sessions.retain(|_, (_, expires_at)| *expires_at > now);

        Ok(u64::try_from(before - sessions.len()).unwrap_or(u64::MAX))
    }
}

#[automock]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load an unexpired session.
    async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError>;

    /// Create or replace a session. Concurrent saves of the same id are last
    /// write wins.
    async fn save(
        &self,
        id: &SessionId,
        session: &Session,
        expires_at: Timestamp,
    ) -> Result<(), SessionStoreError>;

    /// Delete a session; deleting an unknown id is not an error.
    async fn delete(&self, id: &SessionId) -> Result<(), SessionStoreError>;

    /// Delete every expired session, returning how many were removed.
    async fn purge_expired(&self) -> Result<u64, SessionStoreError>;
}
