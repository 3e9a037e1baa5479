//! Quote Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use swatch_app::domain::quotes::heal;

use crate::{
    extensions::*,
    observability::record_items_pruned,
    quotes::{errors::resolve_status_error, handlers::existing_list, models::QuoteResponse},
    state::State,
};

/// Quote Index Handler
///
/// Lists the visitor's quote items. Items whose product, color or size has
/// since left the catalog are dropped from the list.
#[endpoint(
    tags("quotes"),
    summary = "List Quote Items",
    responses(
        (status_code = StatusCode::OK, description = "Quote items"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<QuoteResponse>, StatusError> {
    let state = Arc::clone(depot.obtain_or_500::<Arc<State>>()?);
    let session = depot.session_mut_or_500()?;

    let Some(mut list) = existing_list(session)? else {
        return Ok(Json(QuoteResponse {
            items: Vec::new(),
            count: 0,
        }));
    };

    let healed = heal(state.app.catalog.as_ref(), &mut list)
        .await
        .map_err(resolve_status_error)?;

    record_items_pruned(healed.pruned);

    Ok(Json(QuoteResponse {
        count: list.len(),
        items: healed.lines.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use swatch::quotes::QuoteList;
    use swatch_app::domain::{
        catalog::{CatalogServiceError, MockCatalogService},
        sessions::{MemorySessionStore, SessionStore},
    };

    use crate::test_helpers::{
        catalog_with_products, quote_service, quote_session, seed_session, session_cookie,
        strict_catalog_mock, strict_notifier_mock, stored_session,
    };

    use super::*;

    fn make_service(catalog: MockCatalogService, sessions: Arc<dyn SessionStore>) -> Service {
        quote_service(
            catalog,
            strict_notifier_mock(),
            sessions,
            Router::with_path("quote").get(handler),
        )
    }

    #[tokio::test]
    async fn test_index_without_session_is_empty() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());

        let mut res = TestClient::get("http://example.com/quote")
            .send(&make_service(strict_catalog_mock(), store))
            .await;

        let body: QuoteResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert!(body.items.is_empty());
        assert_eq!(body.count, 0);
        assert!(res.cookie("swatch_session").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_resolves_items_and_prunes_stale_ones() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());
        let session = quote_session(&[(10, Some(2), Some(5), 3), (99, None, None, 1)])?;
        let id = seed_session(&store, &session).await?;

        let mut res = TestClient::get("http://example.com/quote")
            .add_header("cookie", session_cookie(&id), true)
            .send(&make_service(catalog_with_products(), store.clone()))
            .await;

        let body: QuoteResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.count, 1);

        let item = body.items.first().ok_or("expected one item")?;

        assert_eq!(item.key, "10_2_5");
        assert_eq!(item.product.name, "Silk Vinyl");
        assert_eq!(item.color.as_ref().map(|color| color.name.as_str()), Some("Ivory"));
        assert_eq!(item.size.as_ref().map(|size| size.name.as_str()), Some("4L"));
        assert_eq!(item.quantity, 3);

        let mut stored = stored_session(&store, &id).await?.ok_or("session missing")?;
        let list = QuoteList::new(&mut stored)?;

        assert_eq!(list.len(), 1, "stale item should be pruned from the store");
        assert!(list.get("99_none_none").is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_index_catalog_failure_returns_500() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());
        let id = seed_session(&store, &quote_session(&[(10, None, None, 1)])?).await?;

        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_product()
            .once()
            .returning(|_| Err(CatalogServiceError::Sql(sqlx::Error::PoolTimedOut)));

        let res = TestClient::get("http://example.com/quote")
            .add_header("cookie", session_cookie(&id), true)
            .send(&make_service(catalog, store.clone()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::INTERNAL_SERVER_ERROR));

        let mut stored = stored_session(&store, &id).await?.ok_or("session missing")?;

        assert_eq!(QuoteList::new(&mut stored)?.len(), 1);

        Ok(())
    }
}
