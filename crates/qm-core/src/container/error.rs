use thiserror::Error;

/// A failure while bringing a service into the container
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing answers to the name: not a built-in and no loadable
    /// library under the services root
    #[error("service '{name}' not found: {detail}")]
    NotFound { name: String, detail: String },

    /// The name is already bound in the container
    #[error("service '{name}' already loaded")]
    Duplicate { name: String },
}

impl LoadError {
    /// Process exit code the CLI maps this failure to
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::Duplicate { .. } => 1,
            LoadError::NotFound { .. } => 2,
        }
    }

    /// Name of the service the failure concerns
    pub fn service_name(&self) -> &str {
        match self {
            LoadError::NotFound { name, .. } | LoadError::Duplicate { name } => name,
        }
    }
}

/// Service errors with structured variants
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("service init failed: {message}")]
    Init {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("service config error: {message}")]
    Config { message: String },

    #[error("operation failed: {message}")]
    Operation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("remote API error: {message}")]
    Remote {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let duplicate = LoadError::Duplicate {
            name: "mail".to_string(),
        };
        assert_eq!(duplicate.exit_code(), 1);

        let not_found = LoadError::NotFound {
            name: "ledger".to_string(),
            detail: "no services root configured".to_string(),
        };
        assert_eq!(not_found.exit_code(), 2);
    }

    #[test]
    fn test_display_includes_name_and_detail() {
        let err = LoadError::NotFound {
            name: "ledger".to_string(),
            detail: "no service library under /tmp/services/ledger".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("'ledger'"));
        assert!(rendered.contains("no service library"));
        assert_eq!(err.service_name(), "ledger");
    }
}
