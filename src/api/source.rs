//! [`PageSource`] implementations over the list endpoints.

use async_trait::async_trait;

use super::client::ApiClient;
use crate::error::SpheragResult;
use crate::models::{Atlas, PageFetch, System};
use crate::traits::{HttpClient, PageSource};

/// The user's farms.
pub struct SystemsSource<C: HttpClient> {
    api: ApiClient<C>,
}

impl<C: HttpClient> SystemsSource<C> {
    pub fn new(api: ApiClient<C>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl<C: HttpClient + 'static> PageSource for SystemsSource<C> {
    type Item = System;

    async fn fetch_page(&self, page: u32) -> SpheragResult<PageFetch<System>> {
        self.api.list_systems(page).await
    }

    fn page_size(&self) -> u32 {
        self.api.config().page_size
    }

    fn label(&self) -> String {
        "systems".to_string()
    }
}

/// The devices of one farm.
pub struct AtlasesSource<C: HttpClient> {
    api: ApiClient<C>,
    system_id: i64,
}

impl<C: HttpClient> AtlasesSource<C> {
    pub fn new(api: ApiClient<C>, system_id: i64) -> Self {
        Self { api, system_id }
    }

    pub fn system_id(&self) -> i64 {
        self.system_id
    }
}

#[async_trait]
impl<C: HttpClient + 'static> PageSource for AtlasesSource<C> {
    type Item = Atlas;

    async fn fetch_page(&self, page: u32) -> SpheragResult<PageFetch<Atlas>> {
        self.api.list_atlases(self.system_id, page).await
    }

    fn page_size(&self) -> u32 {
        self.api.config().page_size
    }

    fn label(&self) -> String {
        format!("atlases({})", self.system_id)
    }
}
