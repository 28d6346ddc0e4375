//! Document storage for raw search batches and flattened listings.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Key a flattened listing is stored and deduplicated under
pub const LISTING_KEY: &str = "listing_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// One envelope of raw search results per run
    RawSearches,
    /// One flattened document per listing
    Listings,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Self::RawSearches => "raw_searches",
            Self::Listings => "listings",
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a document, returning its object id
    async fn insert(&self, collection: Collection, document: Value) -> Result<String>;

    /// The subset of `listing_ids` not yet present in [`Collection::Listings`],
    /// in first-seen order and without duplicates
    async fn unknown_listing_ids(&self, listing_ids: &[i64]) -> Result<Vec<i64>>;
}

/// Stores every document as a pretty-printed JSON file under
/// `<root>/<collection>/<object id>.json`.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn collection_dir(&self, collection: Collection) -> PathBuf {
        self.root.join(collection.name())
    }

    fn document_path(&self, collection: Collection, object_id: &str) -> PathBuf {
        self.collection_dir(collection)
            .join(format!("{object_id}.json"))
    }
}

/// Listings are keyed by their id so re-ingesting one overwrites it;
/// everything else gets a fresh UUID.
fn object_id(collection: Collection, document: &Value) -> String {
    match (collection, document.get(LISTING_KEY).and_then(Value::as_i64)) {
        (Collection::Listings, Some(listing_id)) => listing_id.to_string(),
        _ => Uuid::new_v4().to_string(),
    }
}

async fn exists(path: &Path) -> Result<bool> {
    tokio::fs::try_exists(path)
        .await
        .with_context(|| format!("Failed to check {}", path.display()))
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn insert(&self, collection: Collection, document: Value) -> Result<String> {
        let object_id = object_id(collection, &document);
        let dir = self.collection_dir(collection);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create {}", dir.display()))?;

        // Written beside the final path and renamed into place, so
        // `<object id>.json` only ever holds a complete document.
        let path = self.document_path(collection, &object_id);
        let staging = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(&document)?;
        tokio::fs::write(&staging, json)
            .await
            .with_context(|| format!("Unable to insert into {}", collection.name()))?;
        tokio::fs::rename(&staging, &path)
            .await
            .with_context(|| format!("Unable to commit {} into {}", object_id, collection.name()))?;

        debug!("Inserted {} into {}", object_id, collection.name());
        Ok(object_id)
    }

    async fn unknown_listing_ids(&self, listing_ids: &[i64]) -> Result<Vec<i64>> {
        let mut seen = HashSet::new();
        let mut unknown = Vec::new();

        for &listing_id in listing_ids {
            if !seen.insert(listing_id) {
                continue;
            }
            let path = self.document_path(Collection::Listings, &listing_id.to_string());
            if !exists(&path).await? {
                unknown.push(listing_id);
            }
        }

        Ok(unknown)
    }
}
