//! HTTP mail relay client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::notifications::{Notifier, NotifierError, OutboundMessage};

/// Configuration for connecting to a mail relay.
#[derive(Debug, Clone)]
pub struct HttpMailerConfig {
    /// Relay endpoint the message is posted to, e.g. `"https://relay.example/v1/send"`.
    pub endpoint: String,

    /// Bearer token presented to the relay.
    pub token: String,

    /// Upper bound for a single dispatch.
    pub timeout: Duration,
}

/// Sends notifications by posting them as JSON to a mail relay.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    config: HttpMailerConfig,
    http: Client,
}

impl HttpMailer {
    /// Create a new mailer from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: HttpMailerConfig) -> Result<Self, NotifierError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }
}

#[async_trait]
impl Notifier for HttpMailer {
    async fn send(&self, message: OutboundMessage) -> Result<usize, NotifierError> {
        if message.to.is_empty() {
            return Err(NotifierError::NoRecipients);
        }

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.token)
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(NotifierError::UnexpectedResponse(format!(
                "send request failed with status {status}: {text}"
            )));
        }

        let parsed: SendResponse = response.json().await?;

        if parsed.accepted == 0 {
            return Err(NotifierError::NotAccepted);
        }

        debug!(accepted = parsed.accepted, "mail relay accepted message");

        Ok(parsed.accepted)
    }
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    accepted: usize,
}
