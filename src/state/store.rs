//! Process-wide state: the signed-in user and the farms list.

use std::sync::{Arc, Mutex};

use super::controller::SharedList;
use super::list::PaginatedList;
use super::lock;
use crate::auth::{Credentials, Session};
use crate::models::System;

/// Two independent slices. The credential slice is the same [`Session`] the
/// API client reads its token from.
#[derive(Debug, Clone, Default)]
pub struct Store {
    session: Session,
    systems: SharedList<System>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            systems: Arc::new(Mutex::new(PaginatedList::new())),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn set_credential(&self, username: &str, token: &str) {
        self.session.set(Credentials::new(username, token));
    }

    pub fn clear_credential(&self) {
        self.session.clear();
    }

    pub fn credential(&self) -> Option<Credentials> {
        self.session.current()
    }

    /// Handle for the farms list controller.
    pub fn systems_list(&self) -> SharedList<System> {
        Arc::clone(&self.systems)
    }

    pub fn systems(&self) -> Vec<System> {
        lock(&self.systems).items().to_vec()
    }

    pub fn replace_all(&self, systems: Vec<System>) {
        lock(&self.systems).replace_all(systems);
    }

    /// Append farms, skipping ids already present.
    pub fn append_all(&self, systems: Vec<System>) -> usize {
        lock(&self.systems).append_all(systems)
    }

    /// Flip `favorite` on the farm with `id`. Local only. Returns `false`
    /// when no farm has that id.
    pub fn toggle_favorite(&self, id: i64) -> bool {
        lock(&self.systems).update(&id, |system| system.favorite = !system.favorite)
    }
}
