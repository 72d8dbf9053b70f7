use crate::config::{self, Config};
use std::path::{Path, PathBuf};

/// What a service gets to see while initializing
#[derive(Debug, Clone)]
pub struct ServiceContext {
    /// Name the service is bound under
    pub name: String,
    /// The service's `[services.<name>]` config section, if present
    pub config: Option<toml::Table>,
    /// Directory for service-owned state (token stores and similar)
    pub data_dir: PathBuf,
}

impl ServiceContext {
    pub fn new(
        name: impl Into<String>,
        config: Option<toml::Table>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            config,
            data_dir: data_dir.into(),
        }
    }

    /// Build the context for `name` from resolved configuration
    pub fn for_service(config: &Config, home_dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            config: config.service_config(name).cloned(),
            data_dir: config::service_data_dir(home_dir, name),
        }
    }

    /// The config section as a table reference
    pub fn config_table(&self) -> Option<&toml::Table> {
        self.config.as_ref()
    }
}
