//! Quote Submission
//!
//! Sends the resolvable contents of a visitor's quote list to the sales team
//! and clears the list once the message has been accepted.

use std::sync::Arc;

use tracing::{info, warn};

use swatch::{quotes::QuoteList, session::Session};

use crate::{
    domain::{
        catalog::CatalogService,
        quotes::{
            errors::{ContactError, SubmissionError},
            resolve::{QuoteLine, heal},
            summary::{html_body, plain_body},
        },
    },
    notifications::{Notifier, NotifierError, OutboundMessage},
};

/// Default subject line for quote requests.
pub const DEFAULT_SUBJECT: &str = "New Quote Request";

/// Who is asking for the quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl ContactDetails {
    /// Trim every field, dropping optional ones that end up blank.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(self.phone),
            message: non_blank(self.message),
        }
    }

    /// Check the required fields.
    ///
    /// # Errors
    ///
    /// Returns the first missing or malformed field.
    pub fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::NameRequired);
        }

        let email = self.email.trim();

        if email.is_empty() {
            return Err(ContactError::EmailRequired);
        }

        if !email.contains('@') {
            return Err(ContactError::EmailInvalid);
        }

        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Where quote requests go and how they are branded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionSettings {
    pub sales_recipient: String,
    pub sender: String,
    pub site_name: String,
    pub subject: String,
}

/// Result of a dispatched quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Receipt {
    /// Recipients the notifier reported as accepted.
    pub recipients: usize,

    /// Items included in the request.
    pub items: usize,

    /// Stale items dropped before sending.
    pub pruned: usize,
}

#[derive(Clone)]
pub struct QuoteSubmitter {
    catalog: Arc<dyn CatalogService>,
    notifier: Arc<dyn Notifier>,
    settings: SubmissionSettings,
}

impl QuoteSubmitter {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogService>,
        notifier: Arc<dyn Notifier>,
        settings: SubmissionSettings,
    ) -> Self {
        Self {
            catalog,
            notifier,
            settings,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &SubmissionSettings {
        &self.settings
    }

    /// Send the quote list held in `session` and clear it.
    ///
    /// Stale items are pruned first. The list is only cleared after the
    /// notifier accepts the message for at least one recipient; otherwise it
    /// is left as it was, apart from the pruning.
    ///
    /// # Errors
    ///
    /// Returns an error when the contact details are invalid, nothing
    /// resolvable is listed, the catalog fails or the message is not
    /// dispatched.
    pub async fn submit(
        &self,
        session: &mut Session,
        contact: ContactDetails,
    ) -> Result<Receipt, SubmissionError> {
        let contact = contact.normalized();

        contact.validate()?;

        let mut list = QuoteList::new(session)?;

        let healed = heal(self.catalog.as_ref(), &mut list).await?;

        if healed.lines.is_empty() {
            return Err(SubmissionError::EmptyQuote);
        }

        let message = self.compose(&contact, &healed.lines);

        let recipients = match self.notifier.send(message).await {
            Ok(0) => Err(NotifierError::NotAccepted),
            other => other,
        };

        let recipients = match recipients {
            Ok(recipients) => recipients,
            Err(error) => {
                warn!(error = %error, "quote request dispatch failed");

                return Err(error.into());
            }
        };

        list.clear();

        info!(
            items = healed.lines.len(),
            recipients, "quote request dispatched"
        );

        Ok(Receipt {
            recipients,
            items: healed.lines.len(),
            pruned: healed.pruned,
        })
    }

    fn compose(&self, contact: &ContactDetails, lines: &[QuoteLine]) -> OutboundMessage {
        let plain = plain_body(contact, lines);
        let html = html_body(&self.settings.site_name, &self.settings.subject, &plain);

        OutboundMessage {
            subject: self.settings.subject.clone(),
            plain_body: plain,
            html_body: Some(html),
            from: self.settings.sender.clone(),
            to: vec![self.settings.sales_recipient.clone()],
        }
    }
}
