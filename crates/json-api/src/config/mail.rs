//! Mail Relay Config

use std::time::Duration;

use clap::Args;
use swatch_app::notifications::HttpMailerConfig;

/// Mail relay settings.
#[derive(Debug, Args)]
pub struct MailConfig {
    /// Mail relay endpoint quote requests are posted to
    #[arg(long, env = "MAIL_RELAY_URL")]
    pub mail_relay_url: String,

    /// Bearer token for the mail relay
    #[arg(long, env = "MAIL_RELAY_TOKEN", hide_env_values = true, default_value = "")]
    pub mail_relay_token: String,

    /// Mail relay request timeout in seconds
    #[arg(long, env = "MAIL_TIMEOUT_SECONDS", default_value_t = 10_u64)]
    pub mail_timeout_seconds: u64,

    /// Sender address for outgoing mail
    #[arg(long, env = "MAIL_FROM", default_value = "noreply@extrapaints.co.ke")]
    pub mail_from: String,
}

impl MailConfig {
    /// Relay client settings.
    #[must_use]
    pub fn mailer(&self) -> HttpMailerConfig {
        HttpMailerConfig {
            endpoint: self.mail_relay_url.clone(),
            token: self.mail_relay_token.clone(),
            timeout: Duration::from_secs(self.mail_timeout_seconds),
        }
    }
}
