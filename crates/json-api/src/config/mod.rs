//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    mail::MailConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    quotes::QuotesConfig,
    server::ServerRuntimeConfig,
    sessions::SessionConfig,
};

pub(crate) mod db;
pub(crate) mod mail;
pub(crate) mod observability;
pub(crate) mod quotes;
pub(crate) mod server;
pub(crate) mod sessions;

/// Swatch JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "swatch-json", about = "Swatch JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Request observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Visitor session settings.
    #[command(flatten)]
    pub sessions: SessionConfig,

    /// Mail relay settings.
    #[command(flatten)]
    pub mail: MailConfig,

    /// Quote request routing and branding.
    #[command(flatten)]
    pub quotes: QuotesConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}
