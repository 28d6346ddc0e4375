use crate::domain_api::traits::DomainApi;
use crate::domain_api::types::{SearchPage, SearchQuery};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

const API_KEY_HEADER: &str = "X-Api-Key";
const TOTAL_COUNT_HEADER: &str = "X-Total-Count";
const PAGE_NUMBER_HEADER: &str = "X-Pagination-PageNumber";
const BAD_CREDENTIALS: &str = "Unable to verify credentials";

/// HTTP client for the Domain listings API
pub struct DomainClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl DomainClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl DomainApi for DomainClient {
    async fn search_page(&self, query: &SearchQuery) -> Result<SearchPage> {
        let url = format!("{}/listings/residential/_search", self.base_url);
        debug!("Making search request. URL: {}, page: {}", url, query.page_number);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(query)
            .send()
            .await
            .context("Failed to send search request")?;

        let headers = response.headers().clone();
        let body: Value = response
            .json()
            .await
            .context("Failed to read search response body")?;
        let listings = search_results(body)?;

        Ok(SearchPage {
            listings,
            total_count: header_number(&headers, TOTAL_COUNT_HEADER)?,
            page_number: header_number(&headers, PAGE_NUMBER_HEADER)?,
        })
    }

    async fn listing(&self, listing_id: i64) -> Result<Value> {
        let url = format!("{}/listings/{}", self.base_url, listing_id);
        debug!("Making listing request. URL: {}", url);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await
            .with_context(|| format!("Failed to fetch listing {listing_id}"))?;

        if !response.status().is_success() {
            warn!("Listing {} returned status: {}", listing_id, response.status());
            anyhow::bail!("Failed to fetch listing {}: {}", listing_id, response.status());
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to read listing {listing_id}"))
    }
}

/// Search results come back as an array; an object means the query failed.
fn search_results(body: Value) -> Result<Vec<Value>> {
    match body {
        Value::Array(listings) => Ok(listings),
        Value::Object(failure) => {
            let detail = failure
                .get("detail")
                .or_else(|| failure.get("message"))
                .and_then(Value::as_str)
                .unwrap_or("no detail given");
            if detail == BAD_CREDENTIALS {
                error!("Unable to verify Domain credentials");
                anyhow::bail!("Unable to verify Domain credentials");
            }
            anyhow::bail!("Search request failed: {detail}")
        }
        other => anyhow::bail!("Unexpected search response: {other}"),
    }
}

fn header_number<T: std::str::FromStr>(headers: &HeaderMap, name: &str) -> Result<T> {
    headers
        .get(name)
        .with_context(|| format!("Missing {name} header"))?
        .to_str()
        .with_context(|| format!("Non-text {name} header"))?
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Non-numeric {name} header"))
}
