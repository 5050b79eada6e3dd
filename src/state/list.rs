//! A paginated, de-duplicated collection and its loading flags.
//!
//! [`PaginatedList`] only holds state and applies transitions; it never does
//! I/O. [`ListController`](super::ListController) drives it around requests.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use super::filter::FilterCache;
use crate::models::{Atlas, PageFetch, System};

/// Something that can live in a [`PaginatedList`].
pub trait ListItem {
    type Key: Eq + Hash + Clone + Debug + Send + Sync;

    /// Unique key within one loaded collection.
    fn key(&self) -> Self::Key;

    /// Text the search filter matches against.
    fn name(&self) -> &str;
}

impl ListItem for System {
    type Key = i64;

    fn key(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl ListItem for Atlas {
    type Key = String;

    fn key(&self) -> String {
        self.imei.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// What a finished load did to the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Page 1 replaced the items.
    Loaded { count: usize, exhausted: bool },
    /// A later page was appended. `added` excludes duplicates.
    Appended { added: usize, exhausted: bool },
    /// The server had no more data; the list is now exhausted.
    Exhausted,
    /// Another load was in flight or the list was already exhausted.
    Skipped,
    /// The controller shut down before the response arrived.
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct PaginatedList<T: ListItem> {
    items: Vec<T>,
    keys: HashSet<T::Key>,
    page: u32,
    total: Option<u64>,
    loading_initial: bool,
    loading_more: bool,
    exhausted: bool,
    revision: u64,
    filter: FilterCache,
}

impl<T: ListItem> Default for PaginatedList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            keys: HashSet::new(),
            page: 1,
            total: None,
            loading_initial: false,
            loading_more: false,
            exhausted: false,
            revision: 0,
            filter: FilterCache::default(),
        }
    }
}

impl<T: ListItem> PaginatedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Last page merged into the list (1 before anything loads).
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total reported by the server, if any page carried one.
    pub fn total(&self) -> Option<u64> {
        self.total
    }

    pub fn is_loading_initial(&self) -> bool {
        self.loading_initial
    }

    pub fn is_loading_more(&self) -> bool {
        self.loading_more
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Bumped on every change to `items`.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| &item.key() == key)
    }

    /// Replace every item, keeping the first of any duplicate keys.
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items.clear();
        self.keys.clear();
        self.push_unique(items);
        self.revision += 1;
    }

    /// Append items whose key is not present yet. Returns how many were added.
    pub fn append_all(&mut self, items: Vec<T>) -> usize {
        let added = self.push_unique(items);
        if added > 0 {
            self.revision += 1;
        }
        added
    }

    /// Mutate the item with `key` in place. Returns `false` when absent.
    ///
    /// `f` must not change the item's key.
    pub fn update<F>(&mut self, key: &T::Key, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.items.iter_mut().find(|item| &item.key() == key) {
            Some(item) => {
                f(item);
                self.revision += 1;
                true
            }
            None => false,
        }
    }

    /// Items whose name contains `query`, memoised on the query and revision.
    pub fn filtered(&mut self, query: &str) -> Vec<&T> {
        let revision = self.revision;
        let indices = self.filter.indices(&self.items, revision, query);
        indices.iter().map(|&i| &self.items[i]).collect()
    }

    /// How many times the filter has actually run.
    pub fn filter_computations(&self) -> u64 {
        self.filter.computations()
    }

    pub fn begin_initial(&mut self) {
        self.loading_initial = true;
    }

    /// Apply the answer to page 1.
    pub fn finish_initial(&mut self, fetch: PageFetch<T>, page_size: u32) -> LoadOutcome {
        self.loading_initial = false;
        self.page = 1;
        match fetch {
            PageFetch::Records(page) => {
                let received = page.records.len();
                self.total = page.total;
                self.replace_all(page.records);
                self.exhausted = self.is_last_page(received, page_size);
                LoadOutcome::Loaded {
                    count: self.items.len(),
                    exhausted: self.exhausted,
                }
            }
            PageFetch::NoData { .. } => {
                self.total = None;
                self.replace_all(Vec::new());
                self.exhausted = true;
                LoadOutcome::Exhausted
            }
        }
    }

    pub fn fail_initial(&mut self) {
        self.loading_initial = false;
    }

    /// Claim the next page. `None` while a load is in flight or once exhausted.
    pub fn begin_load_more(&mut self) -> Option<u32> {
        if self.loading_more || self.loading_initial || self.exhausted {
            return None;
        }
        self.loading_more = true;
        Some(self.page + 1)
    }

    /// Apply the answer to page `page` claimed by [`begin_load_more`](Self::begin_load_more).
    pub fn finish_load_more(&mut self, page: u32, fetch: PageFetch<T>, page_size: u32) -> LoadOutcome {
        self.loading_more = false;
        match fetch {
            PageFetch::Records(result) if result.records.is_empty() => {
                self.exhausted = true;
                LoadOutcome::Exhausted
            }
            PageFetch::Records(result) => {
                let received = result.records.len();
                if result.total.is_some() {
                    self.total = result.total;
                }
                let added = self.append_all(result.records);
                self.page = page;
                self.exhausted = self.is_last_page(received, page_size);
                LoadOutcome::Appended {
                    added,
                    exhausted: self.exhausted,
                }
            }
            PageFetch::NoData { .. } => {
                self.exhausted = true;
                LoadOutcome::Exhausted
            }
        }
    }

    /// Release the guard after a failed request. The page is not advanced,
    /// so the next call retries it.
    pub fn fail_load_more(&mut self) {
        self.loading_more = false;
    }

    /// Drop both loading claims. Used when the controller that made them
    /// goes away before its requests finish.
    pub fn cancel_loads(&mut self) {
        self.loading_initial = false;
        self.loading_more = false;
    }

    fn is_last_page(&self, received: usize, page_size: u32) -> bool {
        let short = received < page_size as usize;
        let reached_total = self
            .total
            .is_some_and(|total| self.items.len() as u64 >= total);
        short || reached_total
    }

    fn push_unique(&mut self, items: Vec<T>) -> usize {
        let before = self.items.len();
        for item in items {
            if self.keys.insert(item.key()) {
                self.items.push(item);
            }
        }
        self.items.len() - before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Page;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(u32, String);

    impl ListItem for Item {
        type Key = u32;
        fn key(&self) -> u32 {
            self.0
        }
        fn name(&self) -> &str {
            &self.1
        }
    }

    fn items(range: std::ops::Range<u32>) -> Vec<Item> {
        range.map(|i| Item(i, format!("item {}", i))).collect()
    }

    fn records(range: std::ops::Range<u32>) -> PageFetch<Item> {
        PageFetch::Records(Page::new(items(range)))
    }

    #[test]
    fn test_initial_page_replaces() {
        let mut list = PaginatedList::new();
        list.replace_all(items(100..103));

        list.begin_initial();
        assert!(list.is_loading_initial());
        let outcome = list.finish_initial(records(0..10), 10);

        assert_eq!(outcome, LoadOutcome::Loaded { count: 10, exhausted: false });
        assert!(!list.is_loading_initial());
        assert_eq!(list.items()[0].0, 0);
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn test_no_data_on_initial_is_empty_and_exhausted() {
        let mut list = PaginatedList::<Item>::new();
        list.begin_initial();
        assert_eq!(
            list.finish_initial(PageFetch::NoData { status: 204 }, 10),
            LoadOutcome::Exhausted
        );
        assert!(list.is_empty());
        assert_eq!(list.begin_load_more(), None);
    }

    #[test]
    fn test_guard_blocks_second_claim() {
        let mut list = PaginatedList::new();
        list.finish_initial(records(0..10), 10);

        assert_eq!(list.begin_load_more(), Some(2));
        assert_eq!(list.begin_load_more(), None);
        list.finish_load_more(2, records(10..20), 10);
        assert_eq!(list.begin_load_more(), Some(3));
    }

    #[test]
    fn test_append_skips_duplicates() {
        let mut list = PaginatedList::new();
        list.finish_initial(records(0..10), 10);

        let page = list.begin_load_more().unwrap();
        let outcome = list.finish_load_more(page, records(5..15), 10);

        assert_eq!(outcome, LoadOutcome::Appended { added: 5, exhausted: false });
        assert_eq!(list.len(), 15);
        let keys: Vec<u32> = list.items().iter().map(|i| i.0).collect();
        assert_eq!(keys, (0..15).collect::<Vec<_>>());
    }

    #[test]
    fn test_short_page_exhausts() {
        let mut list = PaginatedList::new();
        list.finish_initial(records(0..10), 10);
        let page = list.begin_load_more().unwrap();
        let outcome = list.finish_load_more(page, records(10..15), 10);

        assert_eq!(outcome, LoadOutcome::Appended { added: 5, exhausted: true });
        assert_eq!(list.begin_load_more(), None);
    }

    #[test]
    fn test_known_total_exhausts_on_full_page() {
        let mut list = PaginatedList::new();
        list.finish_initial(PageFetch::Records(Page::new(items(0..10)).with_total(20)), 10);
        let page = list.begin_load_more().unwrap();
        let outcome = list.finish_load_more(page, records(10..20), 10);

        assert_eq!(outcome, LoadOutcome::Appended { added: 10, exhausted: true });
        assert_eq!(list.total(), Some(20));
    }

    #[test]
    fn test_failure_keeps_page_and_allows_retry() {
        let mut list = PaginatedList::new();
        list.finish_initial(records(0..10), 10);

        assert_eq!(list.begin_load_more(), Some(2));
        list.fail_load_more();

        assert!(!list.is_loading_more());
        assert!(!list.is_exhausted());
        assert_eq!(list.page(), 1);
        assert_eq!(list.begin_load_more(), Some(2));
    }

    #[test]
    fn test_cancel_loads_releases_both_claims() {
        let mut list = PaginatedList::new();
        list.finish_initial(records(0..10), 10);
        assert_eq!(list.begin_load_more(), Some(2));
        list.begin_initial();

        list.cancel_loads();

        assert!(!list.is_loading_more());
        assert!(!list.is_loading_initial());
        assert_eq!(list.begin_load_more(), Some(2));
    }

    #[test]
    fn test_update_and_revision() {
        let mut list = PaginatedList::new();
        list.replace_all(items(0..3));
        let rev = list.revision();

        assert!(list.update(&1, |item| item.1 = "renamed".to_string()));
        assert_eq!(list.get(&1).unwrap().1, "renamed");
        assert!(list.revision() > rev);

        let rev = list.revision();
        assert!(!list.update(&999, |item| item.1.clear()));
        assert_eq!(list.revision(), rev);
    }

    #[test]
    fn test_filtered_is_memoised() {
        let mut list = PaginatedList::new();
        list.replace_all(items(0..12));

        assert_eq!(list.filtered("item 1").len(), 3);
        assert_eq!(list.filtered("item 1").len(), 3);
        assert_eq!(list.filter_computations(), 1);

        list.append_all(items(12..13));
        assert_eq!(list.filtered("item 1").len(), 4);
        assert_eq!(list.filter_computations(), 2);
        assert_eq!(list.len(), 13);
    }
}
