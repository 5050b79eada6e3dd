//! File-based credentials provider adapter.

use async_trait::async_trait;
use std::path::Path;

use crate::auth::credentials::{Credentials, CredentialsManager};
use crate::traits::{CredentialsError, CredentialsProvider};

/// [`CredentialsProvider`] over `~/.spherag/credentials.json`.
#[derive(Debug, Clone)]
pub struct FileCredentialsProvider {
    manager: CredentialsManager,
}

impl FileCredentialsProvider {
    /// Provider for the default location. Fails without a home directory.
    pub fn new() -> Result<Self, CredentialsError> {
        Ok(Self {
            manager: CredentialsManager::new()?,
        })
    }

    pub fn with_manager(manager: CredentialsManager) -> Self {
        Self { manager }
    }

    pub fn credentials_path(&self) -> &Path {
        self.manager.credentials_path()
    }
}

#[async_trait]
impl CredentialsProvider for FileCredentialsProvider {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        let manager = self.manager.clone();
        let loaded = tokio::task::spawn_blocking(move || manager.load())
            .await
            .map_err(|e| CredentialsError::LoadFailed(e.to_string()))??;
        // A file written by an older login without a token is as good as none.
        Ok(loaded.filter(Credentials::has_token))
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        let manager = self.manager.clone();
        let creds = creds.clone();
        tokio::task::spawn_blocking(move || manager.save(&creds))
            .await
            .map_err(|e| CredentialsError::SaveFailed(e.to_string()))??;
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        let manager = self.manager.clone();
        tokio::task::spawn_blocking(move || manager.clear())
            .await
            .map_err(|e| CredentialsError::ClearFailed(e.to_string()))??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn provider(dir: &TempDir) -> FileCredentialsProvider {
        FileCredentialsProvider::with_manager(CredentialsManager::with_path(
            dir.path().join("credentials.json"),
        ))
    }

    #[tokio::test]
    async fn test_round_trip_through_file() {
        let dir = TempDir::new().unwrap();
        let provider = provider(&dir);

        assert!(provider.load().await.unwrap().is_none());
        provider.save(&Credentials::new("ana", "tok")).await.unwrap();
        assert!(provider.credentials_path().exists());
        assert_eq!(
            provider.load().await.unwrap(),
            Some(Credentials::new("ana", "tok"))
        );

        provider.clear().await.unwrap();
        assert!(provider.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tokenless_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let provider = provider(&dir);
        provider.save(&Credentials::new("ana", "")).await.unwrap();
        assert!(provider.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let provider = provider(&dir);
        std::fs::write(provider.credentials_path(), "{").unwrap();
        assert!(matches!(
            provider.load().await,
            Err(CredentialsError::Io(_))
        ));
    }
}
