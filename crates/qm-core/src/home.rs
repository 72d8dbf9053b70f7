//! Canonical home directory resolution
//!
//! Single source of truth for home directory resolution across the
//! quartermaster crates. Supports custom deployments and testing via the
//! `QM_HOME` environment variable.
//!
//! # Precedence
//!
//! 1. `QM_HOME` environment variable (if set and non-empty)
//! 2. `dirs::home_dir()` platform default
//!
//! Integration tests MUST set `QM_HOME` to a temp directory so they never
//! touch the real user configuration.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Get the home directory for quartermaster operations
///
/// # Errors
///
/// Returns an error if `QM_HOME` is not set and the platform home directory
/// cannot be determined via `dirs::home_dir()`.
pub fn get_home_dir() -> Result<PathBuf> {
    // Check QM_HOME first (useful for testing and custom deployments)
    if let Ok(home) = std::env::var("QM_HOME") {
        let trimmed = home.trim();
        if !trimmed.is_empty() {
            return Ok(PathBuf::from(trimmed));
        }
    }

    // Fall back to platform default
    dirs::home_dir().context("Could not determine home directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn restore(original: Option<String>) {
        unsafe {
            match original {
                Some(v) => env::set_var("QM_HOME", v),
                None => env::remove_var("QM_HOME"),
            }
        }
    }

    #[test]
    #[serial]
    fn test_qm_home_set() {
        let original = env::var("QM_HOME").ok();
        unsafe { env::set_var("QM_HOME", "/custom/home") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, PathBuf::from("/custom/home"));

        restore(original);
    }

    #[test]
    #[serial]
    fn test_qm_home_not_set_uses_platform_default() {
        let original = env::var("QM_HOME").ok();
        unsafe { env::remove_var("QM_HOME") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, dirs::home_dir().unwrap());

        restore(original);
    }

    #[test]
    #[serial]
    fn test_qm_home_empty_string_uses_platform_default() {
        let original = env::var("QM_HOME").ok();
        unsafe { env::set_var("QM_HOME", "") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, dirs::home_dir().unwrap());

        restore(original);
    }

    #[test]
    #[serial]
    fn test_qm_home_whitespace_is_trimmed() {
        let original = env::var("QM_HOME").ok();
        unsafe { env::set_var("QM_HOME", "  /custom/home  ") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, PathBuf::from("/custom/home"));

        restore(original);
    }

    #[test]
    #[serial]
    fn test_qm_home_with_spaces_in_path() {
        let original = env::var("QM_HOME").ok();
        unsafe { env::set_var("QM_HOME", "/path with spaces/home") };

        let home = get_home_dir().unwrap();
        assert_eq!(home, PathBuf::from("/path with spaces/home"));

        restore(original);
    }
}
