//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Complete configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Container behavior
    #[serde(default)]
    pub container: ContainerConfig,
    /// Service-specific configuration sections: [services.<name>]
    #[serde(default)]
    pub services: HashMap<String, toml::Table>,
}

/// Container behavior configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Narrate each load on stdout ("Loading <name>... ok") instead of
    /// printing full failure detail
    #[serde(default)]
    pub verbose: bool,
    /// Keep loading remaining services after a failure or duplicate
    #[serde(default = "default_keep_alive")]
    pub keep_alive: bool,
    /// Directory holding external service libraries
    /// (default: ~/.config/qm/services)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services_root: Option<PathBuf>,
    /// Services loaded when `qm load` is run without arguments
    #[serde(default)]
    pub autoload: Vec<String>,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            keep_alive: default_keep_alive(),
            services_root: None,
            autoload: Vec::new(),
        }
    }
}

fn default_keep_alive() -> bool {
    true
}

impl Config {
    /// Get a service's configuration section by name.
    /// Returns None if the service has no config section.
    pub fn service_config(&self, name: &str) -> Option<&toml::Table> {
        self.services.get(name)
    }
}
