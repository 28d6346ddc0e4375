//! One ingestion pass: search, archive the raw batch, then fetch, normalize
//! and store every listing not seen before.

use crate::config::Config;
use crate::domain_api::{search_all, search_result_listing_id, DomainApi};
use crate::normalizer::normalize_value;
use crate::store::{Collection, DocumentStore};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Envelope a run's raw search results are archived in
#[derive(Debug, Serialize)]
pub struct RawSearchBatch {
    pub listings: Vec<Value>,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Search results returned by the API
    pub searched: usize,
    /// Listings not yet in the store
    pub new: usize,
    pub stored: usize,
    pub failed: usize,
}

pub async fn run(
    api: Arc<dyn DomainApi>,
    store: Arc<dyn DocumentStore>,
    config: &Config,
) -> Result<RunSummary> {
    let results = search_all(
        api.as_ref(),
        config.postcodes.as_slice(),
        config.listing_type,
        config.page_size,
    )
    .await
    .context("Search failed")?;
    info!("{} listings returned from Domain", results.len());

    let listing_ids: Vec<i64> = results.iter().filter_map(search_result_listing_id).collect();
    let mut summary = RunSummary {
        searched: results.len(),
        ..RunSummary::default()
    };

    let batch = RawSearchBatch {
        listings: results,
        created: Utc::now(),
    };
    let object_id = store
        .insert(Collection::RawSearches, serde_json::to_value(&batch)?)
        .await?;
    info!("Stored raw search results as {}", object_id);

    let new_ids = store.unknown_listing_ids(&listing_ids).await?;
    debug!(
        "There are {} new listings from a total {} listings currently active",
        new_ids.len(),
        listing_ids.len()
    );
    summary.new = new_ids.len();

    let permits = Arc::new(Semaphore::new(config.detail_concurrency.max(1)));
    let mut tasks = JoinSet::new();
    for listing_id in new_ids {
        let api = Arc::clone(&api);
        let store = Arc::clone(&store);
        let permits = Arc::clone(&permits);
        tasks.spawn(async move {
            let _permit = permits.acquire_owned().await?;
            ingest_listing(api.as_ref(), store.as_ref(), listing_id)
                .await
                .with_context(|| format!("Listing {listing_id}"))
        });
    }

    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => summary.stored += 1,
            Ok(Err(e)) => {
                warn!("Skipping listing: {:#}", e);
                summary.failed += 1;
            }
            Err(e) => {
                warn!("Listing task did not finish: {}", e);
                summary.failed += 1;
            }
        }
    }

    info!(
        "Run complete: {} searched, {} new, {} stored, {} failed",
        summary.searched, summary.new, summary.stored, summary.failed
    );
    Ok(summary)
}

/// Fetch, normalize and store a single listing
async fn ingest_listing(
    api: &dyn DomainApi,
    store: &dyn DocumentStore,
    listing_id: i64,
) -> Result<()> {
    debug!("Getting listing for listing_id: {}", listing_id);
    let raw = api.listing(listing_id).await?;
    let listing = normalize_value(raw).context("Unable to normalize listing")?;
    debug!("Listing {} priced as {:?}", listing.listing_id, listing.pricing());

    store
        .insert(Collection::Listings, Value::Object(listing.flatten()))
        .await?;
    info!("Stored listing {}", listing.listing_id);
    Ok(())
}
