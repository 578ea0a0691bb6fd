//! Cache bucket storage trait and error types.

use async_trait::async_trait;
use url::Url;

use super::http::StoredResponse;

/// Errors that can occur during cache bucket operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache bucket '{0}' does not exist")]
    MissingBucket(String),
}

pub type CacheResult<T> = Result<T, CacheError>;

/// Named, versioned request→response stores.
///
/// Entries are keyed by absolute URL. Implementations must be safe for
/// concurrent reads and writes from independent requests.
///
/// # Implementations
///
/// - [`crate::infrastructure::offline::MemoryCacheStorage`] - In-process storage
#[async_trait]
pub trait CacheStorage: Send + Sync {
    /// Opens a bucket, creating it if it does not exist. Opening an existing
    /// bucket leaves its entries untouched.
    async fn open(&self, bucket: &str) -> CacheResult<()>;

    /// Names of all existing buckets.
    async fn keys(&self) -> CacheResult<Vec<String>>;

    /// Deletes a bucket with all its entries.
    ///
    /// Returns `Ok(false)` if the bucket did not exist.
    async fn delete(&self, bucket: &str) -> CacheResult<bool>;

    /// Looks up an entry.
    ///
    /// Returns `Ok(None)` on a miss, including when the bucket does not exist.
    async fn get(&self, bucket: &str, key: &Url) -> CacheResult<Option<StoredResponse>>;

    /// Stores an entry, replacing any previous one for the same key.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::MissingBucket`] if the bucket was never opened.
    async fn put(&self, bucket: &str, key: &Url, response: StoredResponse) -> CacheResult<()>;

    /// Keys of all entries in a bucket.
    async fn entries(&self, bucket: &str) -> CacheResult<Vec<Url>>;
}
