//! Test helpers.

use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use salvo::{affix_state::inject, prelude::*};
use testresult::TestResult;

use swatch::{
    ids::{ColorId, ProductId, SizeId},
    quotes::QuoteList,
    session::Session,
};
use swatch_app::{
    context::AppContext,
    domain::{
        catalog::{
            CatalogServiceError, MockCatalogService,
            models::{Category, Color, Product, ProductOffers, Size},
        },
        quotes::SubmissionSettings,
        sessions::{MemorySessionStore, SessionId, SessionStore},
    },
    notifications::MockNotifier,
};

use crate::{
    sessions::{self, CookieSettings, SESSION_COOKIE},
    state::State,
};

pub(crate) const TEST_COOKIES: CookieSettings = CookieSettings {
    secure: false,
    max_age_seconds: 3_600,
};

pub(crate) fn test_submission_settings() -> SubmissionSettings {
    SubmissionSettings {
        sales_recipient: "sales@example.com".to_string(),
        sender: "noreply@example.com".to_string(),
        site_name: "ExtraPaints".to_string(),
        subject: "New Quote Request".to_string(),
    }
}

pub(crate) fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_get_product().never();
    catalog.expect_get_color().never();
    catalog.expect_get_size().never();
    catalog.expect_product_offers().never();

    catalog
}

pub(crate) fn strict_notifier_mock() -> MockNotifier {
    let mut notifier = MockNotifier::new();

    notifier.expect_send().never();

    notifier
}

pub(crate) fn make_state(
    catalog: MockCatalogService,
    notifier: MockNotifier,
    sessions: Arc<dyn SessionStore>,
) -> Arc<State> {
    let app = AppContext {
        catalog: Arc::new(catalog),
        sessions,
        notifier: Arc::new(notifier),
    };

    State::from_app_context(app, test_submission_settings(), TEST_COOKIES)
}

pub(crate) fn state_with_sessions(sessions: Arc<dyn SessionStore>) -> Arc<State> {
    make_state(strict_catalog_mock(), strict_notifier_mock(), sessions)
}

pub(crate) fn quote_service(
    catalog: MockCatalogService,
    notifier: MockNotifier,
    store: Arc<dyn SessionStore>,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(make_state(catalog, notifier, store)))
            .hoop(sessions::middleware::handler)
            .push(route),
    )
}

pub(crate) fn make_product(id: i64, features_colors: bool, features_sizes: bool) -> Product {
    Product {
        id: ProductId::new(id),
        name: "Silk Vinyl".to_string(),
        slug: "silk-vinyl".to_string(),
        category: Category {
            id: 1,
            name: "Emulsions".to_string(),
            slug: "emulsions".to_string(),
            features_colors,
            features_sizes,
        },
        is_active: true,
    }
}

pub(crate) fn make_color(id: i64) -> Color {
    Color {
        id: ColorId::new(id),
        name: "Ivory".to_string(),
        code: "IV-01".to_string(),
        hex_code: Some("#FFFFF0".to_string()),
    }
}

pub(crate) fn make_size(id: i64) -> Size {
    Size {
        id: SizeId::new(id),
        name: "4L".to_string(),
    }
}

/// Product `id` offered in color 2 and size 5 where its category uses them.
pub(crate) fn make_offers(id: i64, features_colors: bool, features_sizes: bool) -> ProductOffers {
    ProductOffers {
        product: make_product(id, features_colors, features_sizes),
        available_colors: if features_colors {
            vec![ColorId::new(2)]
        } else {
            Vec::new()
        },
        available_sizes: if features_sizes {
            vec![SizeId::new(5)]
        } else {
            Vec::new()
        },
    }
}

/// Catalog holding product 10 along with any color or size; everything else
/// is missing.
pub(crate) fn catalog_with_products() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog
        .expect_get_product()
        .returning(|id| match id.into_inner() {
            10 => Ok(make_product(10, true, true)),
            _ => Err(CatalogServiceError::NotFound),
        });
    catalog
        .expect_get_color()
        .returning(|id| Ok(make_color(id.into_inner())));
    catalog
        .expect_get_size()
        .returning(|id| Ok(make_size(id.into_inner())));
    catalog.expect_product_offers().never();

    catalog
}

/// A session whose quote list holds `(product, color, size, quantity)` lines.
pub(crate) fn quote_session(lines: &[(i64, Option<i64>, Option<i64>, i64)]) -> TestResult<Session> {
    let mut session = Session::new();
    let mut list = QuoteList::new(&mut session)?;

    for &(product, color, size, quantity) in lines {
        list.add(
            ProductId::new(product),
            quantity,
            color.map(ColorId::new),
            size.map(SizeId::new),
        )?;
    }

    Ok(session)
}

pub(crate) async fn seed_session(
    store: &MemorySessionStore,
    session: &Session,
) -> TestResult<SessionId> {
    let id = SessionId::generate();
    let expires_at = Timestamp::now() + SignedDuration::from_secs(3_600);

    store.save(&id, session, expires_at).await?;

    Ok(id)
}

pub(crate) async fn stored_session(
    store: &MemorySessionStore,
    id: &SessionId,
) -> TestResult<Option<Session>> {
    Ok(store.load(id).await?)
}

pub(crate) fn session_cookie(id: &SessionId) -> String {
    format!("{SESSION_COOKIE}={id}")
}
