//! State

use std::sync::Arc;

use swatch_app::{
    context::AppContext,
    domain::quotes::{QuoteSubmitter, SubmissionSettings},
};

use crate::sessions::CookieSettings;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) submitter: QuoteSubmitter,
    pub(crate) cookies: CookieSettings,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        app: AppContext,
        submission: SubmissionSettings,
        cookies: CookieSettings,
    ) -> Self {
        let submitter =
            QuoteSubmitter::new(app.catalog.clone(), app.notifier.clone(), submission);

        Self {
            app,
            submitter,
            cookies,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(
        app: AppContext,
        submission: SubmissionSettings,
        cookies: CookieSettings,
    ) -> Arc<Self> {
        Arc::new(Self::new(app, submission, cookies))
    }
}
