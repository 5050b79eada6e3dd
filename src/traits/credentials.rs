//! Credentials provider trait abstraction.
//!
//! Persists the signed-in user between CLI invocations. The in-memory
//! session lives in [`Session`](crate::auth::Session); a provider only
//! stores and restores it.

use async_trait::async_trait;

use crate::auth::Credentials;
use crate::error::{AuthError, SpheragError, SystemError};

/// Credentials operation errors.
#[derive(Debug, Clone, PartialEq)]
pub enum CredentialsError {
    /// Stored credentials exist but could not be read back
    LoadFailed(String),
    /// Failed to save credentials
    SaveFailed(String),
    /// Failed to clear credentials
    ClearFailed(String),
    /// Filesystem failure
    Io(SystemError),
}

impl std::fmt::Display for CredentialsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialsError::LoadFailed(msg) => write!(f, "Failed to load credentials: {}", msg),
            CredentialsError::SaveFailed(msg) => write!(f, "Failed to save credentials: {}", msg),
            CredentialsError::ClearFailed(msg) => {
                write!(f, "Failed to clear credentials: {}", msg)
            }
            CredentialsError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for CredentialsError {}

impl From<SystemError> for CredentialsError {
    fn from(err: SystemError) -> Self {
        CredentialsError::Io(err)
    }
}

impl From<CredentialsError> for SpheragError {
    fn from(err: CredentialsError) -> Self {
        match err {
            CredentialsError::LoadFailed(message) => {
                AuthError::CredentialsLoadFailed { message }.into()
            }
            CredentialsError::SaveFailed(message) | CredentialsError::ClearFailed(message) => {
                AuthError::CredentialsSaveFailed { message }.into()
            }
            CredentialsError::Io(err) => err.into(),
        }
    }
}

/// Trait for credentials storage and retrieval.
#[async_trait]
pub trait CredentialsProvider: Send + Sync {
    /// Load credentials from storage.
    ///
    /// # Returns
    /// - `Ok(Some(credentials))` if credentials exist and were loaded successfully
    /// - `Ok(None)` if no credentials are stored
    /// - `Err(error)` if loading failed
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError>;

    /// Save credentials to storage.
    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError>;

    /// Clear all stored credentials. Clearing when nothing is stored succeeds.
    async fn clear(&self) -> Result<(), CredentialsError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn test_credentials_error_display() {
        assert_eq!(
            CredentialsError::LoadFailed("bad json".to_string()).to_string(),
            "Failed to load credentials: bad json"
        );
        assert_eq!(
            CredentialsError::ClearFailed("busy".to_string()).to_string(),
            "Failed to clear credentials: busy"
        );
    }

    #[test]
    fn test_conversion_into_spherag_error() {
        let load: SpheragError = CredentialsError::LoadFailed("x".to_string()).into();
        assert!(load.requires_reauth());

        let io: SpheragError = CredentialsError::Io(SystemError::NoHomeDirectory).into();
        assert_eq!(io.category(), ErrorCategory::System);
    }
}
