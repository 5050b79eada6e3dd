//! Client-side state: paginated lists, their controllers and the shared store.
//!
//! - [`PaginatedList`]: items, page counter and loading flags
//! - [`ListController`]: loads pages from a [`PageSource`](crate::traits::PageSource) into a list
//! - [`Store`]: the session plus the farms list

pub mod controller;
pub mod filter;
pub mod list;
pub mod store;

pub use controller::{ListController, SharedList};
pub use filter::{filter_by_name, FilterCache};
pub use list::{ListItem, LoadOutcome, PaginatedList};
pub use store::Store;

use std::sync::{Mutex, MutexGuard};

/// Lock a state mutex. State transitions cannot panic halfway, so a
/// poisoned lock still holds consistent data.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
