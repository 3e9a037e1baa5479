//! Outbound notifications.

use async_trait::async_trait;
use mockall::automock;
use serde::Serialize;
use thiserror::Error;

mod http;

pub use http::{HttpMailer, HttpMailerConfig};

/// A message ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub subject: String,

    #[serde(rename = "text")]
    pub plain_body: String,

    #[serde(rename = "html", skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,

    pub from: String,
    pub to: Vec<String>,
}

/// Errors dispatching a notification.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// The message has nobody to go to.
    #[error("message has no recipients")]
    NoRecipients,

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered successfully but took the message for nobody.
    #[error("mail relay accepted the message for no recipients")]
    NotAccepted,

    /// The relay refused the message or answered with an unexpected body.
    #[error("unexpected response from mail relay: {0}")]
    UnexpectedResponse(String),
}

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Dispatch `message`, returning how many recipients accepted it.
    ///
    /// A successful return always reports at least one recipient.
    async fn send(&self, message: OutboundMessage) -> Result<usize, NotifierError>;
}
