//! Name search over a loaded list.

use super::list::ListItem;

/// Indices of `items` whose name contains `query` (case-sensitive), in order.
/// An empty query matches everything.
pub fn matching_indices<T: ListItem>(items: &[T], query: &str) -> Vec<usize> {
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| query.is_empty() || item.name().contains(query))
        .map(|(i, _)| i)
        .collect()
}

/// Items whose name contains `query`, keeping their order.
pub fn filter_by_name<'a, T: ListItem>(items: &'a [T], query: &str) -> Vec<&'a T> {
    matching_indices(items, query)
        .into_iter()
        .map(|i| &items[i])
        .collect()
}

/// Last filter result, reused while neither the query nor the list changed.
#[derive(Debug, Default, Clone)]
pub struct FilterCache {
    key: Option<(String, u64)>,
    indices: Vec<usize>,
    computations: u64,
}

impl FilterCache {
    /// Matching indices for `query` over `items` at list `revision`.
    pub fn indices<T: ListItem>(&mut self, items: &[T], revision: u64, query: &str) -> &[usize] {
        let fresh = matches!(&self.key, Some((q, rev)) if q == query && *rev == revision);
        if !fresh {
            self.indices = matching_indices(items, query);
            self.key = Some((query.to_string(), revision));
            self.computations += 1;
        }
        &self.indices
    }

    /// How many times the filter actually ran.
    pub fn computations(&self) -> u64 {
        self.computations
    }
}
