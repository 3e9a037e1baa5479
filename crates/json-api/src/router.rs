//! App Router

use salvo::Router;

use crate::{quotes, sessions};

/// Quote routes, behind the session middleware.
pub(crate) fn app_router() -> Router {
    Router::with_path("quote")
        .hoop(sessions::middleware::handler)
        .get(quotes::index::handler)
        .push(Router::with_path("count").get(quotes::count::handler))
        .push(
            Router::with_path("items")
                .post(quotes::add::handler)
                .push(
                    Router::with_path("{key}")
                        .put(quotes::update::handler)
                        .delete(quotes::remove::handler),
                ),
        )
        .push(Router::with_path("submit").post(quotes::submit::handler))
}
