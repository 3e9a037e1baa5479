//! Submit Quote Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use swatch_app::domain::quotes::{ContactDetails, SubmissionError};

use crate::{
    extensions::*,
    observability::{SubmissionOutcome, record_items_pruned, record_submission},
    quotes::errors::submission_status_error,
    state::State,
};

/// Submit Quote Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SubmitQuoteRequest {
    pub name: String,
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub message: Option<String>,
}

impl From<SubmitQuoteRequest> for ContactDetails {
    fn from(request: SubmitQuoteRequest) -> Self {
        ContactDetails {
            name: request.name,
            email: request.email,
            phone: request.phone,
            message: request.message,
        }
    }
}

/// Quote Submitted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteSubmittedResponse {
    /// Items included in the request
    pub items: usize,

    /// Items dropped because they left the catalog
    pub pruned: usize,
}

fn outcome(error: &SubmissionError) -> SubmissionOutcome {
    match error {
        SubmissionError::InvalidContact(_) | SubmissionError::EmptyQuote => {
            SubmissionOutcome::Rejected
        }
        SubmissionError::Dispatch(_) => SubmissionOutcome::DispatchFailed,
        SubmissionError::Resolve(_) | SubmissionError::Quote(_) => SubmissionOutcome::Failed,
    }
}

/// Submit Quote Handler
///
/// Sends the listed items to the sales team and empties the list. The list
/// is kept when the message could not be sent.
#[endpoint(
    tags("quotes"),
    summary = "Submit Quote Request",
    responses(
        (status_code = StatusCode::OK, description = "Quote request sent"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid contact details or empty quote"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Quote request could not be sent"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(name = "quotes.submit", skip(json, depot), err)]
pub(crate) async fn handler(
    json: JsonBody<SubmitQuoteRequest>,
    depot: &mut Depot,
) -> Result<Json<QuoteSubmittedResponse>, StatusError> {
    let state = Arc::clone(depot.obtain_or_500::<Arc<State>>()?);
    let session = depot.session_mut_or_500()?;

    match state.submitter.submit(session, json.into_inner().into()).await {
        Ok(receipt) => {
            record_items_pruned(receipt.pruned);
            record_submission(SubmissionOutcome::Sent);

            Ok(Json(QuoteSubmittedResponse {
                items: receipt.items,
                pruned: receipt.pruned,
            }))
        }
        Err(error) => {
            record_submission(outcome(&error));

            Err(submission_status_error(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use swatch::quotes::QuoteList;
    use swatch_app::{
        domain::{catalog::MockCatalogService, sessions::MemorySessionStore},
        notifications::{MockNotifier, NotifierError, OutboundMessage},
    };

    use crate::test_helpers::{
        catalog_with_products, quote_service, quote_session, seed_session, session_cookie,
        strict_catalog_mock, strict_notifier_mock, stored_session,
    };

    use super::*;

    fn make_service(
        catalog: MockCatalogService,
        notifier: MockNotifier,
        store: Arc<MemorySessionStore>,
    ) -> Service {
        quote_service(
            catalog,
            notifier,
            store,
            Router::with_path("quote/submit").post(handler),
        )
    }

    fn contact() -> Value {
        json!({
            "name": "Achieng Otieno",
            "email": "achieng@example.com",
            "phone": "0722 000111",
            "message": "Delivery to Kisumu please"
        })
    }

    #[tokio::test]
    async fn test_submit_sends_and_clears_the_quote() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());
        let session = quote_session(&[(10, Some(2), Some(5), 2), (99, None, None, 1)])?;
        let id = seed_session(&store, &session).await?;

        let mut notifier = MockNotifier::new();

        notifier
            .expect_send()
            .once()
            .withf(|message: &OutboundMessage| {
                message.to == ["sales@example.com"]
                    && message.plain_body.contains("Achieng Otieno (achieng@example.com, 0722 000111)")
                    && message.plain_body.contains("Message: Delivery to Kisumu please")
                    && message.plain_body.contains("- Silk Vinyl (Ivory, 4L) x 2")
            })
            .returning(|_| Ok(1));

        let mut res = TestClient::post("http://example.com/quote/submit")
            .add_header("cookie", session_cookie(&id), true)
            .json(&contact())
            .send(&make_service(catalog_with_products(), notifier, store.clone()))
            .await;

        let body: QuoteSubmittedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.items, 1);
        assert_eq!(body.pruned, 1);

        let cookie = res.cookie("swatch_session").ok_or("removal cookie missing")?;

        assert_eq!(cookie.value(), "", "emptied session should expire the cookie");
        assert!(stored_session(&store, &id).await?.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_dispatch_failure_keeps_the_quote() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());
        let id = seed_session(&store, &quote_session(&[(10, Some(2), Some(5), 2)])?).await?;

        let mut notifier = MockNotifier::new();

        notifier
            .expect_send()
            .once()
            .returning(|_| Err(NotifierError::UnexpectedResponse("503".to_string())));

        let res = TestClient::post("http://example.com/quote/submit")
            .add_header("cookie", session_cookie(&id), true)
            .json(&contact())
            .send(&make_service(catalog_with_products(), notifier, store.clone()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_GATEWAY));

        let mut stored = stored_session(&store, &id).await?.ok_or("session missing")?;
        let list = QuoteList::new(&mut stored)?;

        assert!(list.get("10_2_5").is_some(), "quote should survive a failed send");

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_empty_quote_returns_400() -> TestResult {
        let res = TestClient::post("http://example.com/quote/submit")
            .json(&contact())
            .send(&make_service(
                strict_catalog_mock(),
                strict_notifier_mock(),
                Arc::new(MemorySessionStore::new()),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_invalid_email_returns_400() -> TestResult {
        let store = Arc::new(MemorySessionStore::new());
        let id = seed_session(&store, &quote_session(&[(10, None, None, 1)])?).await?;

        let res = TestClient::post("http://example.com/quote/submit")
            .add_header("cookie", session_cookie(&id), true)
            .json(&json!({ "name": "Achieng", "email": "achieng" }))
            .send(&make_service(
                strict_catalog_mock(),
                strict_notifier_mock(),
                store,
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[test]
    fn outcomes_follow_the_error_kind() {
        assert_eq!(outcome(&SubmissionError::EmptyQuote), SubmissionOutcome::Rejected);
        assert_eq!(
            outcome(&SubmissionError::Dispatch(NotifierError::NoRecipients)),
            SubmissionOutcome::DispatchFailed
        );
    }
}
