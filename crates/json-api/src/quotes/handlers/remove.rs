//! Remove Quote Item Handler

use salvo::{oapi::extract::PathParam, prelude::*};

use crate::{
    extensions::*,
    quotes::{
        handlers::existing_list,
        models::{MutationResponse, MutationStatus},
    },
};

/// Remove Quote Item Handler
#[endpoint(
    tags("quotes"),
    summary = "Remove Quote Item",
    responses(
        (status_code = StatusCode::OK, description = "Quote item removed, or was not listed"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "quotes.remove",
    skip(key, depot),
    fields(key = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    key: PathParam<String>,
    depot: &mut Depot,
) -> Result<Json<MutationResponse>, StatusError> {
    let key = key.into_inner();

    tracing::Span::current().record("key", key.as_str());

    let session = depot.session_mut_or_500()?;

    let (removed, count) = match existing_list(session)? {
        Some(mut list) => {
            let removed = list.remove(&key).or_500("failed to remove quote item")?;

            (removed, list.len())
        }
        None => (false, 0),
    };

    let status = if removed {
        tracing::info!(key = %key, "removed quote item");

        MutationStatus::Removed
    } else {
        MutationStatus::Unchanged
    };

    Ok(Json(MutationResponse { key, status, count }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use swatch_app::domain::sessions::MemorySessionStore;

    use crate::test_helpers::{
        quote_service, quote_session, seed_session, session_cookie, strict_catalog_mock,
        strict_notifier_mock, stored_session,
    };

    use super::*;

    fn make_service(store: Arc<MemorySessionStore>) -> Service {
        quote_service(
            strict_catalog_mock(),
            strict_notifier_mock(),
            store,
            Router::with_path("quote/items/{key}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_listed_item() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());
        let session = quote_session(&[(10, None, Some(5), 1), (11, None, None, 1)])?;
        let id = seed_session(&store, &session).await?;

        let mut res = TestClient::delete("http://example.com/quote/items/10_none_5")
            .add_header("cookie", session_cookie(&id), true)
            .send(&make_service(store.clone()))
            .await;

        let body: MutationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, MutationStatus::Removed);
        assert_eq!(body.count, 1);

        let mut stored = stored_session(&store, &id).await?.ok_or("session missing")?;

        assert!(
            swatch::quotes::QuoteList::new(&mut stored)?
                .get("10_none_5")
                .is_none()
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_unknown_key_is_a_no_op() -> TestResult {
        let mut res = TestClient::delete("http://example.com/quote/items/10_none_none")
            .send(&make_service(Arc::new(MemorySessionStore::new())))
            .await;

        let body: MutationResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.status, MutationStatus::Unchanged);
        assert!(res.cookie("swatch_session").is_none());

        Ok(())
    }
}
