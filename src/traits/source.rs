//! Paginated data source abstraction.

use async_trait::async_trait;

use crate::error::SpheragResult;
use crate::models::PageFetch;
use crate::state::ListItem;

/// One paginated endpoint.
///
/// A [`ListController`](crate::state::ListController) owns a source and asks
/// it for 1-based pages. `PageFetch::NoData` means the server has nothing more.
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    type Item: ListItem + Clone + Send + Sync + 'static;

    /// Fetch 1-based page `page`.
    async fn fetch_page(&self, page: u32) -> SpheragResult<PageFetch<Self::Item>>;

    /// Records per full page. A shorter page is the last one.
    fn page_size(&self) -> u32;

    /// Short label used in log lines, e.g. `systems` or `atlases(42)`.
    fn label(&self) -> String;
}
