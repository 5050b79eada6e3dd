use serde::Deserialize;

use super::null_as_default;

/// One page of a list endpoint: `{records: [...], total?: n}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_default")]
    pub records: Vec<T>,
    #[serde(default)]
    pub total: Option<u64>,
}

impl<T> Page<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            total: None,
        }
    }

    pub fn with_total(mut self, total: u64) -> Self {
        self.total = Some(total);
        self
    }
}

/// Result of asking a source for a page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageFetch<T> {
    /// The server answered 200 with a page body.
    Records(Page<T>),
    /// The server answered with a non-200 status below 400.
    NoData { status: u16 },
}
