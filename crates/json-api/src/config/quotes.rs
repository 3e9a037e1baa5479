//! Quote Request Config

use clap::Args;
use swatch_app::domain::quotes::{SubmissionSettings, submission::DEFAULT_SUBJECT};

/// Quote request routing and branding.
#[derive(Debug, Args)]
pub struct QuotesConfig {
    /// Address quote requests are sent to
    #[arg(long, env = "SALES_TEAM_EMAIL", default_value = "sales@extrapaints.co.ke")]
    pub sales_email: String,

    /// Site name used in the branded email layout
    #[arg(long, env = "SITE_NAME", default_value = "ExtraPaints")]
    pub site_name: String,

    /// Subject line for quote request emails
    #[arg(long, env = "QUOTE_SUBJECT", default_value = DEFAULT_SUBJECT)]
    pub quote_subject: String,
}

impl QuotesConfig {
    /// Submission settings, sent from `sender`.
    #[must_use]
    pub fn submission(&self, sender: &str) -> SubmissionSettings {
        SubmissionSettings {
            sales_recipient: self.sales_email.clone(),
            sender: sender.to_string(),
            site_name: self.site_name.clone(),
            subject: self.quote_subject.clone(),
        }
    }
}
