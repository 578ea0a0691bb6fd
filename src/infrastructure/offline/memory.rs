//! In-process cache bucket storage.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use super::http::StoredResponse;
use super::storage::{CacheError, CacheResult, CacheStorage};

/// [`CacheStorage`] kept in memory for the lifetime of the process.
///
/// Buckets are ordered by name so that [`CacheStorage::keys`] is stable.
#[derive(Debug, Default)]
pub struct MemoryCacheStorage {
    buckets: RwLock<BTreeMap<String, HashMap<String, StoredResponse>>>,
}

impl MemoryCacheStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStorage for MemoryCacheStorage {
    async fn open(&self, bucket: &str) -> CacheResult<()> {
        let mut buckets = self.buckets.write().await;
        if !buckets.contains_key(bucket) {
            debug!(bucket, "Creating cache bucket");
            buckets.insert(bucket.to_string(), HashMap::new());
        }
        Ok(())
    }

    async fn keys(&self) -> CacheResult<Vec<String>> {
        Ok(self.buckets.read().await.keys().cloned().collect())
    }

    async fn delete(&self, bucket: &str) -> CacheResult<bool> {
        Ok(self.buckets.write().await.remove(bucket).is_some())
    }

    async fn get(&self, bucket: &str, key: &Url) -> CacheResult<Option<StoredResponse>> {
        let buckets = self.buckets.read().await;
        Ok(buckets
            .get(bucket)
            .and_then(|entries| entries.get(key.as_str()))
            .cloned())
    }

    async fn put(&self, bucket: &str, key: &Url, response: StoredResponse) -> CacheResult<()> {
        let mut buckets = self.buckets.write().await;
        let entries = buckets
            .get_mut(bucket)
            .ok_or_else(|| CacheError::MissingBucket(bucket.to_string()))?;
        entries.insert(key.to_string(), response);
        Ok(())
    }

    async fn entries(&self, bucket: &str) -> CacheResult<Vec<Url>> {
        let buckets = self.buckets.read().await;
        let Some(entries) = buckets.get(bucket) else {
            return Ok(Vec::new());
        };

        let mut urls: Vec<Url> = entries
            .keys()
            .filter_map(|key| Url::parse(key).ok())
            .collect();
        urls.sort();
        Ok(urls)
    }
}
