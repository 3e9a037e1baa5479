//! Quote request message bodies.

use crate::domain::quotes::{resolve::QuoteLine, submission::ContactDetails};

const ITEMS_RULER: &str = "ITEMS REQUESTED ------------------------------";

/// `Product (Color, Size)`, leaving out whichever dimensions are absent.
#[must_use]
pub fn describe(line: &QuoteLine) -> String {
    let dimensions: Vec<&str> = [
        line.color.as_ref().map(|color| color.name.as_str()),
        line.size.as_ref().map(|size| size.name.as_str()),
    ]
    .into_iter()
    .flatten()
    .collect();

    if dimensions.is_empty() {
        line.product.name.clone()
    } else {
        format!("{} ({})", line.product.name, dimensions.join(", "))
    }
}

/// Plain text body sent to the sales team.
#[must_use]
pub fn plain_body(contact: &ContactDetails, lines: &[QuoteLine]) -> String {
    let reachable_at = match contact.phone.as_deref() {
        Some(phone) => format!("{}, {phone}", contact.email),
        None => contact.email.clone(),
    };

    let items: String = lines
        .iter()
        .map(|line| format!("- {} x {}\n", describe(line), line.quantity))
        .collect();

    format!(
        "New Quote Request from: {} ({reachable_at})\n\nMessage: {}\n\n{ITEMS_RULER}\n{items}",
        contact.name,
        contact.message.as_deref().unwrap_or_default(),
    )
}

/// HTML alternative: the plain body inside a branded layout.
#[must_use]
pub fn html_body(site_name: &str, subject: &str, plain_body: &str) -> String {
    let site_name = escape_html(site_name);
    let subject = escape_html(subject);
    let content = escape_html(plain_body).replace('\n', "<br>\n");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{subject}</title>
</head>
<body style="margin:0;padding:0;background:#f4f4f4;font-family:Arial,Helvetica,sans-serif;color:#333333;">
<table role="presentation" width="100%" cellpadding="0" cellspacing="0">
<tr><td align="center" style="padding:24px;">
<table role="presentation" width="600" cellpadding="0" cellspacing="0" style="background:#ffffff;">
<tr><td style="background:#1f3a5f;color:#ffffff;padding:20px;font-size:22px;font-weight:bold;">{site_name}</td></tr>
<tr><td style="padding:24px;">
<h2 style="margin-top:0;">{subject}</h2>
<p style="line-height:1.5;">{content}</p>
</td></tr>
<tr><td style="padding:16px;font-size:12px;color:#888888;text-align:center;">Sent from the {site_name} website.</td></tr>
</table>
</td></tr>
</table>
</body>
</html>
"#
    )
}

/// Escapes `&`, `<`, `>` and `"`, enough for text nodes and `<title>`.
fn escape_html(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}
