//! Outgoing message composition

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;
use chrono::Utc;

/// A plain-text message ready to compose and send
///
/// Deliberately minimal: one text body, no attachments, no multipart. The
/// remote API takes the whole thing as a base64url-encoded RFC 2822 text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingMessage {
    /// Render the message as RFC 2822 text
    ///
    /// Headers, a Date stamp, a blank line, then the body as-is.
    pub fn to_rfc2822(&self) -> String {
        format!(
            "From: {}\r\nTo: {}\r\nSubject: {}\r\nDate: {}\r\n\r\n{}",
            self.from,
            self.to,
            self.subject,
            Utc::now().to_rfc2822(),
            self.body
        )
    }

    /// The API's `raw` payload: URL-safe base64 of the rendered text
    pub fn encode(&self) -> String {
        URL_SAFE.encode(self.to_rfc2822())
    }
}
