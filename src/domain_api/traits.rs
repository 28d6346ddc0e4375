use crate::domain_api::types::{SearchPage, SearchQuery};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Upstream listings API.
/// Implemented by the HTTP client and by in-memory fakes in tests.
#[async_trait]
pub trait DomainApi: Send + Sync {
    /// Run one page of a residential search
    async fn search_page(&self, query: &SearchQuery) -> Result<SearchPage>;

    /// Fetch the full payload of a single listing
    async fn listing(&self, listing_id: i64) -> Result<Value>;
}
