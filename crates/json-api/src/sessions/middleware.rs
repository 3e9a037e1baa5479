//! Session middleware.
//!
//! Loads the visitor's session before the handler runs and persists it
//! afterwards, but only when the handler changed something.

use std::sync::Arc;

use salvo::prelude::*;
use thiserror::Error;
use tracing::{debug, error};

use swatch::session::Session;
use swatch_app::domain::sessions::{SessionId, SessionStoreError};

use crate::{sessions::SESSION_COOKIE, state::State};

#[derive(Debug, Error)]
enum PersistError {
    #[error("session store failed: {0}")]
    Store(#[from] SessionStoreError),

    #[error("could not compute session expiry: {0}")]
    Expiry(#[from] jiff::Error),
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let state = match depot.obtain::<Arc<State>>() {
        Ok(state) => Arc::clone(state),
        Err(_error) => {
            res.render(StatusError::internal_server_error());

            return;
        }
    };

    let presented = req
        .cookie(SESSION_COOKIE)
        .and_then(|cookie| cookie.value().parse::<SessionId>().ok());

    let (id, session) = match presented {
        Some(id) => match state.app.sessions.load(&id).await {
            Ok(Some(session)) => (Some(id), session),
            Ok(None) => {
                debug!("session cookie refers to an unknown or expired session");

                (None, Session::new())
            }
            Err(source) => {
                error!("failed to load session: {source}");

                res.render(StatusError::internal_server_error());

                return;
            }
        },
        None => (None, Session::new()),
    };

    depot.inject(session);

    ctrl.call_next(req, depot, res).await;

    let Ok(session) = depot.scrape::<Session>() else {
        return;
    };

    if !session.is_modified() {
        return;
    }

    if let Err(source) = persist(&state, id, &session, res).await {
        error!("failed to persist session: {source}");

        res.render(StatusError::internal_server_error());
    }
}

async fn persist(
    state: &State,
    id: Option<SessionId>,
    session: &Session,
    res: &mut Response,
) -> Result<(), PersistError> {
    if session.is_empty() {
        if let Some(id) = id {
            state.app.sessions.delete(&id).await?;
        }

        res.add_cookie(state.cookies.expired());

        return Ok(());
    }

    let id = id.unwrap_or_else(SessionId::generate);
    let expires_at = state.cookies.expires_at()?;

    state.app.sessions.save(&id, session, expires_at).await?;

    res.add_cookie(state.cookies.issue(&id));

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use swatch_app::domain::sessions::{MemorySessionStore, MockSessionStore, SessionStore};

    use crate::{
        extensions::*,
        test_helpers::{
            TEST_COOKIES, seed_session, session_cookie, state_with_sessions, stored_session,
        },
    };

    use super::*;

    #[salvo::handler]
    async fn read_greeting(depot: &mut Depot, res: &mut Response) -> Result<(), StatusError> {
        let session = depot.session_mut_or_500()?;
        let greeting: Option<String> = session.get("greeting").ok().flatten();

        res.render(greeting.unwrap_or_else(|| "none".to_string()));

        Ok(())
    }

    #[salvo::handler]
    async fn write_greeting(depot: &mut Depot) -> Result<(), StatusError> {
        depot
            .session_mut_or_500()?
            .insert("greeting", &json!("hello"))
            .or_500("failed to write greeting")
    }

    #[salvo::handler]
    async fn clear_greeting(depot: &mut Depot) -> Result<(), StatusError> {
        depot.session_mut_or_500()?.remove("greeting");

        Ok(())
    }

    fn make_service(sessions: Arc<dyn SessionStore>) -> Service {
        let router = Router::new()
            .hoop(salvo::affix_state::inject(state_with_sessions(sessions)))
            .hoop(handler)
            .push(Router::with_path("read").get(read_greeting))
            .push(Router::with_path("write").post(write_greeting))
            .push(Router::with_path("clear").post(clear_greeting));

        Service::new(router)
    }

    fn greeting_session() -> TestResult<Session> {
        let mut session = Session::new();

        session.insert("greeting", &json!("hi there"))?;

        Ok(session)
    }

    #[tokio::test]
    async fn read_only_request_sets_no_cookie() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());

        let mut res = TestClient::get("http://example.com/read")
            .send(&make_service(store))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(res.cookie(SESSION_COOKIE).is_none(), "no cookie expected");
        assert_eq!(res.take_string().await?, "none");

        Ok(())
    }

    #[tokio::test]
    async fn modified_session_is_saved_and_cookie_issued() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());

        let res = TestClient::post("http://example.com/write")
            .send(&make_service(store.clone()))
            .await;

        let cookie = res.cookie(SESSION_COOKIE).ok_or("session cookie missing")?;
        let id: SessionId = cookie.value().parse()?;

        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(
            cookie.max_age().map(|age| age.whole_seconds()),
            Some(TEST_COOKIES.max_age_seconds)
        );

        let stored = stored_session(&store, &id).await?.ok_or("session not saved")?;

        assert_eq!(stored.get::<String>("greeting")?.as_deref(), Some("hello"));

        Ok(())
    }

    #[tokio::test]
    async fn existing_session_is_loaded_from_cookie() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());
        let id = seed_session(&store, &greeting_session()?).await?;

        let mut res = TestClient::get("http://example.com/read")
            .add_header("cookie", session_cookie(&id), true)
            .send(&make_service(store))
            .await;

        assert_eq!(res.take_string().await?, "hi there");

        Ok(())
    }

    #[tokio::test]
    async fn emptied_session_is_deleted_and_cookie_expired() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());
        let id = seed_session(&store, &greeting_session()?).await?;

        let res = TestClient::post("http://example.com/clear")
            .add_header("cookie", session_cookie(&id), true)
            .send(&make_service(store.clone()))
            .await;

        let cookie = res.cookie(SESSION_COOKIE).ok_or("removal cookie missing")?;

        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));
        assert!(stored_session(&store, &id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn unknown_session_id_starts_a_fresh_session() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());
        let stale = SessionId::generate();

        let res = TestClient::post("http://example.com/write")
            .add_header("cookie", session_cookie(&stale), true)
            .send(&make_service(store.clone()))
            .await;

        let cookie = res.cookie(SESSION_COOKIE).ok_or("session cookie missing")?;

        assert_ne!(cookie.value(), stale.as_str());
        assert!(stored_session(&store, &stale).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn malformed_cookie_is_ignored() -> TestResult {
        let mut store = MockSessionStore::new();

        store.expect_load().never();
        store.expect_save().never();

        let res = TestClient::get("http://example.com/read")
            .add_header("cookie", format!("{SESSION_COOKIE}=not-a-session"), true)
            .send(&make_service(Arc::new(store)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn store_failure_on_save_returns_500() -> TestResult {
        let mut store = MockSessionStore::new();

        store.expect_load().never();
        store
            .expect_save()
            .once()
            .returning(|_, _, _| Err(SessionStoreError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::post("http://example.com/write")
            .send(&make_service(Arc::new(store)))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        Ok(())
    }
}
