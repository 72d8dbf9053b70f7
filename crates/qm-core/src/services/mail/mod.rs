//! Built-in mail service
//!
//! Wraps a remote, token-authenticated mail HTTP API behind the container's
//! [`Service`](crate::container::Service) contract: zero-argument
//! construction, config-driven `init`, and a typed `send_message` surface
//! reached by downcast.

pub mod config;
pub mod credentials;
pub mod message;
pub mod scopes;
pub mod service;
pub mod transport;

pub use config::MailConfig;
pub use credentials::Credentials;
pub use message::OutgoingMessage;
pub use scopes::Scope;
pub use service::MailService;
pub use transport::{HttpMailTransport, MailTransport, SendReceipt};

use crate::container::{Service, ServiceFactory};
use std::sync::Arc;

/// Factory the catalog registers the mail service under
pub fn factory() -> ServiceFactory {
    ServiceFactory {
        name: "mail".to_string(),
        description: "Send email through a remote mail HTTP API".to_string(),
        construct: Arc::new(|| Box::new(MailService::new()) as Box<dyn Service>),
    }
}
