//! Transport boundary between the mail service and the remote API

use crate::container::ServiceError;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// What the remote API reports back for an accepted message
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SendReceipt {
    /// Message identifier assigned by the remote mailbox
    pub id: String,
    /// Conversation thread the message landed in
    #[serde(rename = "threadId", default)]
    pub thread_id: Option<String>,
    /// Labels applied on delivery
    #[serde(rename = "labelIds", default)]
    pub label_ids: Vec<String>,
}

/// Delivers an encoded message to a mailbox
///
/// The production implementation talks HTTP; tests substitute a recording
/// mock through `MailService::with_transport`.
pub trait MailTransport: Send + Sync {
    /// Send a raw (base64url RFC 2822) message as `user_id`
    fn send_raw(&self, user_id: &str, raw: &str) -> Result<SendReceipt, ServiceError>;
}

/// HTTP transport against the real mail API
pub struct HttpMailTransport {
    client: reqwest::blocking::Client,
    api_base: String,
    access_token: String,
}

impl HttpMailTransport {
    /// Build a transport for an API endpoint and bearer token
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Init` if the HTTP client cannot be
    /// constructed (TLS backend failure and similar).
    pub fn new(api_base: impl Into<String>, access_token: impl Into<String>) -> Result<Self, ServiceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ServiceError::Init {
                message: "failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        })
    }
}

impl MailTransport for HttpMailTransport {
    fn send_raw(&self, user_id: &str, raw: &str) -> Result<SendReceipt, ServiceError> {
        let url = format!("{}/users/{user_id}/messages/send", self.api_base);
        debug!("POST {url}");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&json!({ "raw": raw }))
            .send()
            .map_err(|e| ServiceError::Remote {
                message: format!("request to {url} failed"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ServiceError::Remote {
                message: format!("mail API returned {status}: {}", body.trim()),
                source: None,
            });
        }

        response.json::<SendReceipt>().map_err(|e| ServiceError::Remote {
            message: "mail API returned an unreadable send receipt".to_string(),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_deserializes_api_shape() {
        let receipt: SendReceipt = serde_json::from_str(
            r#"{"id": "18f3a2", "threadId": "18f3a2", "labelIds": ["SENT"]}"#,
        )
        .unwrap();

        assert_eq!(receipt.id, "18f3a2");
        assert_eq!(receipt.thread_id.as_deref(), Some("18f3a2"));
        assert_eq!(receipt.label_ids, vec!["SENT"]);
    }

    #[test]
    fn test_receipt_tolerates_minimal_response() {
        let receipt: SendReceipt = serde_json::from_str(r#"{"id": "18f3a2"}"#).unwrap();
        assert_eq!(receipt.thread_id, None);
        assert!(receipt.label_ids.is_empty());
    }

    #[test]
    fn test_http_transport_trims_trailing_slash() {
        let transport = HttpMailTransport::new("https://mail.internal/v1/", "token").unwrap();
        assert_eq!(transport.api_base, "https://mail.internal/v1");
    }
}
