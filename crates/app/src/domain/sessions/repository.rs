//! Sessions Repository

use std::collections::BTreeMap;

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use serde_json::Value;
use sqlx::{PgPool, query, query_scalar, types::Json};

use crate::domain::sessions::models::SessionId;

const LOAD_SESSION_SQL: &str = include_str!("sql/load_session.sql");
const SAVE_SESSION_SQL: &str = include_str!("sql/save_session.sql");
const DELETE_SESSION_SQL: &str = include_str!("sql/delete_session.sql");
const PURGE_EXPIRED_SESSIONS_SQL: &str = include_str!("sql/purge_expired_sessions.sql");

type SessionData = BTreeMap<String, Value>;

#[derive(Debug, Clone)]
pub(crate) struct PgSessionsRepository {
    pool: PgPool,
}

impl PgSessionsRepository {
    #[must_use]
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) async fn load_session(&self, id: &SessionId) -> Result<Option<SessionData>, sqlx::Error> {
        let data: Option<Json<SessionData>> = query_scalar(LOAD_SESSION_SQL)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(data.map(|Json(data)| data))
    }

    pub(crate) async fn save_session(
        &self,
        id: &SessionId,
        data: &SessionData,
        expires_at: Timestamp,
    ) -> Result<(), sqlx::Error> {
        query(SAVE_SESSION_SQL)
            .bind(id.as_str())
            .bind(Json(data))
            .bind(SqlxTimestamp::from(expires_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub(crate) async fn delete_session(&self, id: &SessionId) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_SESSION_SQL)
            .bind(id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn purge_expired(&self) -> Result<u64, sqlx::Error> {
        let rows_affected = query(PURGE_EXPIRED_SESSIONS_SQL)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}
