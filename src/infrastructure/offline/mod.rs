//! Offline asset cache mirroring the browser service-worker lifecycle.
//!
//! - [`OfflineWorker`] - install / activate / fetch interception
//! - [`WorkerConfig`] - immutable per-version configuration
//! - [`CacheStorage`] - versioned bucket storage ([`MemoryCacheStorage`])
//! - [`Network`] - upstream access ([`HttpNetwork`])

mod config;
mod http;
mod memory;
mod message;
mod network;
mod storage;
mod worker;

pub use config::{AssetManifest, WorkerConfig, cache_name_for};
pub use http::{FetchRequest, StoredResponse};
pub use memory::MemoryCacheStorage;
pub use message::WorkerMessage;
pub use network::{HttpNetwork, Network, NetworkError};
pub use storage::{CacheError, CacheResult, CacheStorage};
pub use worker::{FetchOutcome, OfflineWorker, WorkerError, WorkerState};
