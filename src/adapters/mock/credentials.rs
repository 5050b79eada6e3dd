//! In-memory credentials provider for testing.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::auth::Credentials;
use crate::traits::{CredentialsError, CredentialsProvider};

/// In-memory credentials provider for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentials {
    credentials: Arc<Mutex<Option<Credentials>>>,
    save_should_fail: Arc<Mutex<bool>>,
    load_should_fail: Arc<Mutex<bool>>,
    clear_should_fail: Arc<Mutex<bool>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl InMemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider with initial credentials.
    pub fn with_credentials(creds: Credentials) -> Self {
        let provider = Self::new();
        provider.set_credentials(Some(creds));
        provider
    }

    pub fn set_save_should_fail(&self, should_fail: bool) {
        *lock(&self.save_should_fail) = should_fail;
    }

    pub fn set_load_should_fail(&self, should_fail: bool) {
        *lock(&self.load_should_fail) = should_fail;
    }

    pub fn set_clear_should_fail(&self, should_fail: bool) {
        *lock(&self.clear_should_fail) = should_fail;
    }

    pub fn get_credentials(&self) -> Option<Credentials> {
        lock(&self.credentials).clone()
    }

    pub fn set_credentials(&self, creds: Option<Credentials>) {
        *lock(&self.credentials) = creds;
    }
}

#[async_trait]
impl CredentialsProvider for InMemoryCredentials {
    async fn load(&self) -> Result<Option<Credentials>, CredentialsError> {
        if *lock(&self.load_should_fail) {
            return Err(CredentialsError::LoadFailed("Mock load failure".to_string()));
        }
        Ok(self.get_credentials())
    }

    async fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        if *lock(&self.save_should_fail) {
            return Err(CredentialsError::SaveFailed("Mock save failure".to_string()));
        }
        self.set_credentials(Some(creds.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<(), CredentialsError> {
        if *lock(&self.clear_should_fail) {
            return Err(CredentialsError::ClearFailed("Mock clear failure".to_string()));
        }
        self.set_credentials(None);
        Ok(())
    }
}
