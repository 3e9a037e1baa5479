//! Session Config

use clap::Args;
use swatch_app::context::SessionBackend;

/// Visitor session settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Where sessions are stored (postgres, memory)
    #[arg(long, env = "SESSION_BACKEND", value_enum, default_value_t = SessionBackend::Postgres)]
    pub session_backend: SessionBackend,

    /// Only send the session cookie over HTTPS
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = false)]
    pub session_cookie_secure: bool,

    /// Session lifetime in seconds, renewed on every change
    #[arg(long, env = "SESSION_MAX_AGE_SECONDS", default_value_t = 1_209_600_i64)]
    pub session_max_age_seconds: i64,
}
