//! Configuration discovery and resolution

use super::types::Config;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

/// Command-line overrides for configuration
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Override verbose narration
    pub verbose: Option<bool>,
    /// Override keep-alive behavior
    pub keep_alive: Option<bool>,
    /// Override the services root directory
    pub services_root: Option<PathBuf>,
    /// Path to config file override
    pub config_path: Option<PathBuf>,
}

/// Global configuration directory (`~/.config/qm`)
pub fn config_dir(home_dir: &Path) -> PathBuf {
    home_dir.join(".config/qm")
}

/// Default directory scanned for external service libraries
pub fn default_services_root(home_dir: &Path) -> PathBuf {
    config_dir(home_dir).join("services")
}

/// Per-service data directory (token stores and similar state)
pub fn service_data_dir(home_dir: &Path, service: &str) -> PathBuf {
    config_dir(home_dir).join(service)
}

/// Effective services root: the configured directory, or the default under home
pub fn effective_services_root(config: &Config, home_dir: &Path) -> PathBuf {
    config
        .container
        .services_root
        .clone()
        .unwrap_or_else(|| default_services_root(home_dir))
}

/// Resolve configuration from all sources
///
/// Priority (highest to lowest):
/// 1. Command-line overrides
/// 2. Environment variables
/// 3. Repo-local config (.qm.toml in current dir or git root)
/// 4. Global config (~/.config/qm/config.toml)
/// 5. Defaults
///
/// When `overrides.config_path` is set, that file replaces both the global
/// and repo-local layers; environment and CLI overrides still apply on top.
pub fn resolve_config(
    overrides: &ConfigOverrides,
    current_dir: &Path,
    home_dir: &Path,
) -> Result<Config, ConfigError> {
    let mut config = Config::default();

    if let Some(path) = &overrides.config_path {
        // An explicit config file must parse; failing silently here would
        // mask a user mistake.
        let file_config = load_config_file(path)?;
        merge_config(&mut config, file_config);
    } else {
        // 4. Try global config
        let global_config_path = config_dir(home_dir).join("config.toml");
        if global_config_path.exists() {
            if let Ok(file_config) = load_config_file(&global_config_path) {
                merge_config(&mut config, file_config);
            } else {
                warn!("Failed to parse global config at {global_config_path:?}");
            }
        }

        // 3. Try repo-local config (current dir or git root)
        if let Some(repo_config) = find_repo_local_config(current_dir) {
            if let Ok(file_config) = load_config_file(&repo_config) {
                merge_config(&mut config, file_config);
            } else {
                warn!("Failed to parse repo config at {repo_config:?}");
            }
        }
    }

    // 2. Apply environment variables
    apply_env_overrides(&mut config);

    // 1. Apply command-line overrides
    apply_cli_overrides(&mut config, overrides);

    Ok(config)
}

/// Find repo-local config file
///
/// Searches current directory and parent directories up to git root
fn find_repo_local_config(current_dir: &Path) -> Option<PathBuf> {
    let mut dir = current_dir;

    loop {
        let config_path = dir.join(".qm.toml");
        if config_path.exists() {
            return Some(config_path);
        }

        // Stop at git root
        if dir.join(".git").exists() {
            break;
        }

        // Move to parent
        dir = dir.parent()?;
    }

    None
}

/// One file layer of configuration
///
/// Every key is optional so a layer only participates in the merge for
/// keys it actually sets; a repo-local file that never mentions
/// `[container]` leaves the global booleans alone.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    container: FileContainerConfig,
    #[serde(default)]
    services: HashMap<String, toml::Table>,
}

#[derive(Debug, Default, Deserialize)]
struct FileContainerConfig {
    verbose: Option<bool>,
    keep_alive: Option<bool>,
    services_root: Option<PathBuf>,
    autoload: Option<Vec<String>>,
}

/// Load one config layer from a TOML file
fn load_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&contents)?;
    Ok(config)
}

/// Merge a file layer into the resolved config; only set keys override
fn merge_config(base: &mut Config, file: FileConfig) {
    if let Some(verbose) = file.container.verbose {
        base.container.verbose = verbose;
    }
    if let Some(keep_alive) = file.container.keep_alive {
        base.container.keep_alive = keep_alive;
    }
    if let Some(services_root) = file.container.services_root {
        base.container.services_root = Some(services_root);
    }
    if let Some(autoload) = file.container.autoload {
        base.container.autoload = autoload;
    }

    // Merge service config sections (later sources override earlier ones)
    for (name, table) in file.services {
        base.services.insert(name, table);
    }
}

/// Apply environment variable overrides
fn apply_env_overrides(config: &mut Config) {
    if std::env::var("QM_VERBOSE").is_ok() {
        config.container.verbose = true;
    }

    if std::env::var("QM_NO_KEEP_ALIVE").is_ok() {
        config.container.keep_alive = false;
    }

    if let Ok(root) = std::env::var("QM_SERVICES_ROOT") {
        if !root.trim().is_empty() {
            config.container.services_root = Some(PathBuf::from(root.trim()));
        }
    }
}

/// Apply command-line overrides
fn apply_cli_overrides(config: &mut Config, overrides: &ConfigOverrides) {
    if let Some(verbose) = overrides.verbose {
        config.container.verbose = verbose;
    }

    if let Some(keep_alive) = overrides.keep_alive {
        config.container.keep_alive = keep_alive;
    }

    if let Some(ref root) = overrides.services_root {
        config.container.services_root = Some(root.clone());
    }
}
