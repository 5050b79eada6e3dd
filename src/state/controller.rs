//! Drives a [`PaginatedList`] from a [`PageSource`].
//!
//! The list sits behind a `std::sync::Mutex` that is only taken for the
//! synchronous transitions on either side of a request, never across an
//! await. `load_more` claims the next page under that lock before the request
//! is issued, so overlapping calls on one controller produce one request.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

use super::list::{LoadOutcome, PaginatedList};
use super::lock;
use crate::error::SpheragResult;
use crate::traits::PageSource;

/// A list shared between a controller and its readers.
pub type SharedList<T> = Arc<Mutex<PaginatedList<T>>>;

pub struct ListController<S: PageSource> {
    source: Arc<S>,
    list: SharedList<S::Item>,
    tasks: Arc<Mutex<Vec<AbortHandle>>>,
    closed: Arc<AtomicBool>,
}

impl<S: PageSource> Clone for ListController<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            list: Arc::clone(&self.list),
            tasks: Arc::clone(&self.tasks),
            closed: Arc::clone(&self.closed),
        }
    }
}

impl<S: PageSource> ListController<S> {
    /// Controller with its own empty list.
    pub fn new(source: S) -> Self {
        Self::with_list(source, Arc::new(Mutex::new(PaginatedList::new())))
    }

    /// Controller over an existing list, e.g. the store's farms slice.
    pub fn with_list(source: S, list: SharedList<S::Item>) -> Self {
        Self {
            source: Arc::new(source),
            list,
            tasks: Arc::new(Mutex::new(Vec::new())),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn list(&self) -> SharedList<S::Item> {
        Arc::clone(&self.list)
    }

    /// Read the list under its lock.
    pub fn inspect<R>(&self, f: impl FnOnce(&PaginatedList<S::Item>) -> R) -> R {
        f(&lock(&self.list))
    }

    /// Snapshot of the loaded items.
    pub fn items(&self) -> Vec<S::Item> {
        lock(&self.list).items().to_vec()
    }

    /// Snapshot of the items matching `query`.
    pub fn filtered(&self, query: &str) -> Vec<S::Item> {
        lock(&self.list).filtered(query).into_iter().cloned().collect()
    }

    /// Fetch page 1 and replace the list with it.
    pub async fn load_initial(&self) -> SpheragResult<LoadOutcome> {
        if self.is_closed() {
            return Ok(LoadOutcome::Cancelled);
        }
        lock(&self.list).begin_initial();
        debug!("{}: loading page 1", self.source.label());

        let result = self.source.fetch_page(1).await;
        if self.is_closed() {
            return Ok(LoadOutcome::Cancelled);
        }

        let mut list = lock(&self.list);
        match result {
            Ok(fetch) => Ok(list.finish_initial(fetch, self.source.page_size())),
            Err(err) => {
                list.fail_initial();
                warn!("{}: initial load failed: {}", self.source.label(), err);
                Err(err)
            }
        }
    }

    /// Fetch the next page and append it. No-op while another page is
    /// loading or after the list is exhausted.
    pub async fn load_more(&self) -> SpheragResult<LoadOutcome> {
        match self.claim_next_page() {
            Some(page) => self.complete_load_more(page).await,
            None => Ok(LoadOutcome::Skipped),
        }
    }

    /// Run [`load_initial`](Self::load_initial) in the background and hand the
    /// result to `on_done`, unless the controller shuts down first.
    pub fn spawn_load_initial<F>(&self, on_done: F)
    where
        F: FnOnce(SpheragResult<LoadOutcome>) + Send + 'static,
    {
        let this = self.clone();
        self.track(tokio::spawn(async move {
            let result = this.load_initial().await;
            if !this.is_closed() {
                on_done(result);
            }
        }));
    }

    /// Claim the next page now and fetch it in the background.
    ///
    /// Returns `false`, without spawning, when the guard rejects the claim.
    pub fn spawn_load_more<F>(&self, on_done: F) -> bool
    where
        F: FnOnce(SpheragResult<LoadOutcome>) + Send + 'static,
    {
        let Some(page) = self.claim_next_page() else {
            return false;
        };
        let this = self.clone();
        self.track(tokio::spawn(async move {
            let result = this.complete_load_more(page).await;
            if !this.is_closed() {
                on_done(result);
            }
        }));
        true
    }

    /// Abort in-flight loads and release their claims on the list, so a
    /// later controller over the same list can page again. Late completions
    /// leave the list untouched.
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let handles: Vec<AbortHandle> = lock(&self.tasks).drain(..).collect();
        debug!(
            "{}: shutting down, aborting {} task(s)",
            self.source.label(),
            handles.len()
        );
        for handle in handles {
            handle.abort();
        }
        lock(&self.list).cancel_loads();
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn claim_next_page(&self) -> Option<u32> {
        if self.is_closed() {
            return None;
        }
        lock(&self.list).begin_load_more()
    }

    async fn complete_load_more(&self, page: u32) -> SpheragResult<LoadOutcome> {
        debug!("{}: loading page {}", self.source.label(), page);
        let result = self.source.fetch_page(page).await;
        if self.is_closed() {
            return Ok(LoadOutcome::Cancelled);
        }

        let mut list = lock(&self.list);
        match result {
            Ok(fetch) => Ok(list.finish_load_more(page, fetch, self.source.page_size())),
            Err(err) => {
                list.fail_load_more();
                warn!("{}: page {} failed: {}", self.source.label(), page, err);
                Err(err)
            }
        }
    }

    fn track(&self, handle: JoinHandle<()>) {
        let mut tasks = lock(&self.tasks);
        tasks.retain(|h| !h.is_finished());
        if self.is_closed() {
            handle.abort();
        } else {
            tasks.push(handle.abort_handle());
        }
    }
}
