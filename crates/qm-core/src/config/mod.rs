//! Configuration resolution
//!
//! Resolves configuration from multiple sources with priority:
//! 1. Command-line flags (passed as parameters)
//! 2. Environment variables
//! 3. Repo-local config (.qm.toml)
//! 4. Global config (~/.config/qm/config.toml)
//! 5. Defaults

mod discovery;
mod types;

pub use discovery::{
    config_dir, default_services_root, effective_services_root, resolve_config, service_data_dir,
    ConfigError, ConfigOverrides,
};
pub use types::{Config, ContainerConfig};
