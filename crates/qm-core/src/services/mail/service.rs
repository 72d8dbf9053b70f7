//! The mail service proper

use super::config::MailConfig;
use super::credentials::Credentials;
use super::message::OutgoingMessage;
use super::scopes;
use super::transport::{HttpMailTransport, MailTransport, SendReceipt};
use crate::container::{
    ArgSpec, OperationSpec, Service, ServiceContext, ServiceError, ServiceInfo,
};
use std::any::Any;
use std::path::PathBuf;
use tracing::debug;

/// Built-in service wrapping a remote mail HTTP API
///
/// Constructed with no arguments by its factory; everything else happens in
/// `init`, which reads the `[services.mail]` config section and the
/// provisioned token file. Callers reach the typed surface
/// (`send_message`, `change_scope`) by downcasting through the container.
pub struct MailService {
    config: MailConfig,
    token_path: Option<PathBuf>,
    transport: Option<Box<dyn MailTransport>>,
    initialized: bool,
}

impl Default for MailService {
    fn default() -> Self {
        Self::new()
    }
}

impl MailService {
    pub fn new() -> Self {
        Self {
            config: MailConfig::default(),
            token_path: None,
            transport: None,
            initialized: false,
        }
    }

    /// Substitute a transport, for tests and dry runs
    ///
    /// An injected transport survives `init`: credentials are still
    /// validated but no HTTP client is built over them.
    pub fn with_transport(mut self, transport: Box<dyn MailTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// The effective configuration (defaults until `init` runs)
    pub fn config(&self) -> &MailConfig {
        &self.config
    }

    /// Where the token file lives, once `init` has resolved it
    pub fn token_path(&self) -> Option<&PathBuf> {
        self.token_path.as_ref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Compose and send a plain-text message
    ///
    /// `from` falls back to the configured sender. Remote failures come
    /// back as `ServiceError::Remote` for the caller to report.
    pub fn send_message(
        &self,
        from: Option<&str>,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<SendReceipt, ServiceError> {
        let transport = self.transport.as_ref().ok_or_else(|| ServiceError::Operation {
            message: "mail service is not initialized".to_string(),
            source: None,
        })?;

        let from = from
            .map(String::from)
            .or_else(|| self.config.sender.clone())
            .ok_or_else(|| ServiceError::Config {
                message: "no sender address: pass one explicitly or set `sender` in [services.mail]"
                    .to_string(),
            })?;

        let message = OutgoingMessage {
            from,
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        };

        debug!("Sending message to {to} as {}", self.config.user_id);
        transport.send_raw(&self.config.user_id, &message.encode())
    }

    /// Switch to another authorization scope
    ///
    /// Removes the stored token so the next provisioning run grants the new
    /// scope; the service must be re-initialized with a fresh token before
    /// it can send again.
    pub fn change_scope(&mut self, scope: &str) -> Result<(), ServiceError> {
        if scopes::find(scope).is_none() {
            return Err(ServiceError::Config {
                message: format!(
                    "unknown scope '{scope}' (known: {})",
                    scopes::names().join(", ")
                ),
            });
        }

        if let Some(path) = &self.token_path {
            Credentials::clear(path)?;
        }

        self.config.scope = scope.to_string();
        self.transport = None;
        self.initialized = false;
        Ok(())
    }
}

impl Service for MailService {
    fn info(&self) -> ServiceInfo {
        ServiceInfo {
            name: "mail",
            version: env!("CARGO_PKG_VERSION"),
            description: "Send email through a remote mail HTTP API",
        }
    }

    fn init(&mut self, ctx: &ServiceContext) -> Result<(), ServiceError> {
        self.config = MailConfig::from_table(ctx.config_table());

        if scopes::find(&self.config.scope).is_none() {
            return Err(ServiceError::Config {
                message: format!(
                    "unknown scope '{}' (known: {})",
                    self.config.scope,
                    scopes::names().join(", ")
                ),
            });
        }

        let token_file = PathBuf::from(&self.config.token_file);
        let token_path = if token_file.is_absolute() {
            token_file
        } else {
            ctx.data_dir.join(token_file)
        };

        let credentials = Credentials::load(&token_path)?;
        self.token_path = Some(token_path);

        if self.transport.is_none() {
            self.transport = Some(Box::new(HttpMailTransport::new(
                &self.config.api_base,
                credentials.access_token,
            )?));
        }

        self.initialized = true;
        Ok(())
    }

    fn operations(&self) -> Vec<OperationSpec> {
        vec![
            OperationSpec {
                name: "send_message",
                args: vec![
                    ArgSpec {
                        name: "from",
                        ty: "address",
                        default: Some("configured sender"),
                    },
                    ArgSpec {
                        name: "to",
                        ty: "address",
                        default: None,
                    },
                    ArgSpec {
                        name: "subject",
                        ty: "text",
                        default: None,
                    },
                    ArgSpec {
                        name: "body",
                        ty: "text",
                        default: None,
                    },
                ],
                returns: "receipt",
                doc: "Compose a plain-text message and send it through the remote API",
            },
            OperationSpec {
                name: "change_scope",
                args: vec![ArgSpec {
                    name: "scope",
                    ty: "scope name",
                    default: None,
                }],
                returns: "nothing",
                doc: "Switch authorization scope and drop the stored token so it can take effect",
            },
        ]
    }

    fn help(&self, topic: &str) -> Option<String> {
        // Topic match is prefix-based so "scope" and "scopes" both land
        if topic.to_ascii_lowercase().starts_with("scope") {
            return Some(scopes::help_text());
        }
        None
    }

    fn requirements(&self) -> Vec<&'static str> {
        vec![
            "Enable the provider's mail API for your account in its developer console.",
            "Provision an OAuth token with the configured scope and save it as token JSON \
             (an \"access_token\" field) at the configured token_file path.",
            "Set `sender` in [services.mail] or pass --from on every send.",
        ]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
