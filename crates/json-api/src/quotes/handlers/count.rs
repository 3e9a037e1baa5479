//! Quote Count Handler

use salvo::prelude::*;

use crate::{
    extensions::*,
    quotes::{handlers::existing_list, models::CountResponse},
};

/// Quote Count Handler
///
/// Number of listed items, without checking them against the catalog.
#[endpoint(tags("quotes"), summary = "Count Quote Items")]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CountResponse>, StatusError> {
    let session = depot.session_mut_or_500()?;

    let count = existing_list(session)?.map_or(0, |list| list.len());

    Ok(Json(CountResponse { count }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use swatch_app::domain::sessions::MemorySessionStore;

    use crate::test_helpers::{
        quote_service, quote_session, seed_session, session_cookie, strict_catalog_mock,
        strict_notifier_mock,
    };

    use super::*;

    fn make_service(store: Arc<MemorySessionStore>) -> Service {
        quote_service(
            strict_catalog_mock(),
            strict_notifier_mock(),
            store,
            Router::with_path("quote/count").get(handler),
        )
    }

    #[tokio::test]
    async fn test_count_includes_unresolved_items() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());
        let session = quote_session(&[(10, Some(2), None, 1), (99, None, None, 4)])?;
        let id = seed_session(&store, &session).await?;

        let mut res = TestClient::get("http://example.com/quote/count")
            .add_header("cookie", session_cookie(&id), true)
            .send(&make_service(store))
            .await;

        let body: CountResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_count_without_session_is_zero() -> TestResult {
        let mut res = TestClient::get("http://example.com/quote/count")
            .send(&make_service(Arc::new(MemorySessionStore::new())))
            .await;

        let body: CountResponse = res.take_json().await?;

        assert_eq!(body.count, 0);
        assert!(res.cookie("swatch_session").is_none());

        Ok(())
    }
}
