//! The live credential shared by the API client and the store.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::credentials::Credentials;

/// Cloneable handle to the current credential.
///
/// Every clone sees the same slot. The API client reads it when it builds
/// each request, so `set`/`clear` take effect on the next call.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<Option<Credentials>>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        let session = Self::new();
        session.set(credentials);
        session
    }

    /// Replace the credential. Last writer wins.
    pub fn set(&self, credentials: Credentials) {
        *self.write() = Some(credentials);
    }

    pub fn clear(&self) {
        *self.write() = None;
    }

    pub fn current(&self) -> Option<Credentials> {
        self.read().clone()
    }

    pub fn username(&self) -> Option<String> {
        self.read().as_ref().map(|c| c.username.clone())
    }

    /// Current token, empty when signed out.
    pub fn token(&self) -> String {
        self.read()
            .as_ref()
            .map(|c| c.auth_token.clone())
            .unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().as_ref().is_some_and(Credentials::has_token)
    }

    /// `Authorization` header value. Signed out yields `"Bearer "`.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token())
    }

    // A panic while holding the lock cannot leave a half-written Option.
    fn read(&self) -> RwLockReadGuard<'_, Option<Credentials>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Credentials>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_out_bearer_is_empty() {
        let session = Session::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.bearer_header(), "Bearer ");
    }

    #[test]
    fn test_clones_share_the_slot() {
        let session = Session::new();
        let reader = session.clone();

        session.set(Credentials::new("ana", "t1"));
        assert_eq!(reader.bearer_header(), "Bearer t1");

        session.set(Credentials::new("ana", "t2"));
        assert_eq!(reader.token(), "t2");

        reader.clear();
        assert!(session.current().is_none());
    }

    #[test]
    fn test_empty_token_is_not_authenticated() {
        let session = Session::with_credentials(Credentials::new("ana", ""));
        assert!(!session.is_authenticated());
        assert_eq!(session.username().as_deref(), Some("ana"));
    }
}
