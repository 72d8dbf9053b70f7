//! Mail service configuration

/// Configuration for the mail service, read from `[services.mail]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailConfig {
    /// Authorization scope short name (see the scope table)
    pub scope: String,
    /// Default sender address for outgoing messages
    pub sender: Option<String>,
    /// Remote mailbox the API acts on ("me" means the token's own account)
    pub user_id: String,
    /// Token file; relative paths land in the service data directory
    pub token_file: String,
    /// Base URL of the mail API
    pub api_base: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            scope: "modify".to_string(),
            sender: None,
            user_id: "me".to_string(),
            token_file: "token.json".to_string(),
            api_base: "https://gmail.googleapis.com/gmail/v1".to_string(),
        }
    }
}

impl MailConfig {
    /// Parse from a config table; missing or mistyped keys keep their defaults
    pub fn from_table(table: Option<&toml::Table>) -> Self {
        let default = Self::default();
        let Some(table) = table else {
            return default;
        };

        Self {
            scope: table
                .get("scope")
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or(default.scope),
            sender: table
                .get("sender")
                .and_then(|v| v.as_str())
                .map(String::from),
            user_id: table
                .get("user_id")
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or(default.user_id),
            token_file: table
                .get("token_file")
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or(default.token_file),
            api_base: table
                .get("api_base")
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or(default.api_base),
        }
    }
}
