//! Token file handling for the mail service

use crate::container::ServiceError;
use serde::Deserialize;
use std::path::Path;

/// Bearer credentials read from the provisioned token file
///
/// The token is provisioned out of band (see the service requirements);
/// there is no OAuth flow or refresh here. Extra fields in the file are
/// ignored so tokens written by standard OAuth tooling load as-is.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub access_token: String,
}

impl Credentials {
    /// Load credentials from a JSON token file
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::Init` when the file is missing or does not
    /// hold an `access_token`; the message points at the service
    /// requirements so a missing provisioning step is actionable.
    pub fn load(path: &Path) -> Result<Self, ServiceError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ServiceError::Init {
            message: format!(
                "cannot read token file {} (see the service requirements for provisioning)",
                path.display()
            ),
            source: Some(Box::new(e)),
        })?;

        let credentials: Credentials =
            serde_json::from_str(&contents).map_err(|e| ServiceError::Init {
                message: format!(
                    "token file {} is not valid token JSON (expected an \"access_token\" field)",
                    path.display()
                ),
                source: Some(Box::new(e)),
            })?;

        if credentials.access_token.trim().is_empty() {
            return Err(ServiceError::Init {
                message: format!("token file {} holds an empty access_token", path.display()),
                source: None,
            });
        }

        Ok(credentials)
    }

    /// Remove a stored token file so a new scope can take effect
    ///
    /// A missing file is fine; the point is that no stale token survives.
    pub fn clear(path: &Path) -> Result<(), ServiceError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::Operation {
                message: format!("cannot remove token file {}", path.display()),
                source: Some(Box::new(e)),
            }),
        }
    }
}
