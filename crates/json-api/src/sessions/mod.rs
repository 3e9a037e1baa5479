//! Visitor sessions carried in a cookie.

use jiff::{SignedDuration, Timestamp};
use salvo::http::cookie::{Cookie, SameSite, time::Duration as CookieDuration};

use swatch_app::domain::sessions::SessionId;

pub(crate) mod middleware;

/// Name of the session cookie.
pub(crate) const SESSION_COOKIE: &str = "swatch_session";

/// Session cookie attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CookieSettings {
    pub(crate) secure: bool,
    pub(crate) max_age_seconds: i64,
}

impl CookieSettings {
    /// Expiry for a session saved now.
    pub(crate) fn expires_at(&self) -> Result<Timestamp, jiff::Error> {
        Timestamp::now().checked_add(SignedDuration::from_secs(self.max_age_seconds))
    }

    /// Cookie carrying `id`.
    pub(crate) fn issue(&self, id: &SessionId) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, id.to_string()))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .secure(self.secure)
            .max_age(CookieDuration::seconds(self.max_age_seconds))
            .build()
    }

    /// Cookie telling the browser to forget the session.
    pub(crate) fn expired(&self) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, String::new()))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .secure(self.secure)
            .max_age(CookieDuration::ZERO)
            .build()
    }
}
