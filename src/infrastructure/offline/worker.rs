//! Offline worker lifecycle: install, activate and fetch interception.
//!
//! # Strategy
//!
//! - **Build/static assets**: cache first. A hit never touches the network.
//! - **Everything else** (and asset misses): network first. Successful
//!   (HTTP 200) responses are stored keyed by the full request URL; on
//!   network failure the cache is consulted by path.
//! - **Nothing available**: a synthetic `404 Not found`.
//!
//! # Lifecycle
//!
//! ```text
//! Parsed -> Installing -> Installed -> Activating -> Activated
//!               \
//!                -> Redundant (install failed)
//! ```
//!
//! Requests are only intercepted once the worker is `Activated`; before
//! that they pass through untouched.

use futures::future::try_join_all;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use url::Url;

use super::config::WorkerConfig;
use super::http::{FetchRequest, StoredResponse};
use super::message::WorkerMessage;
use super::network::{Network, NetworkError};
use super::storage::{CacheError, CacheStorage};

/// URL schemes used by browser extensions. Never intercepted.
const EXTENSION_SCHEMES: &[&str] = &["chrome-extension", "chrome", "moz-extension"];

/// Lifecycle states of a worker generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Parsed,
    Installing,
    Installed,
    Activating,
    Activated,
    /// Install failed; the worker never intercepts.
    Redundant,
}

impl WorkerState {
    pub fn can_intercept_fetch(self) -> bool {
        matches!(self, Self::Activated)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Parsed => "parsed",
            Self::Installing => "installing",
            Self::Installed => "installed",
            Self::Activating => "activating",
            Self::Activated => "activated",
            Self::Redundant => "redundant",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("Invalid asset manifest: {0}")]
    Manifest(String),

    #[error("Failed to cache {url}: {reason}")]
    Install { url: String, reason: String },

    #[error("Invalid worker state: expected {expected}, got {actual}")]
    InvalidState {
        expected: WorkerState,
        actual: WorkerState,
    },

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// What to do with an intercepted request.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// Not intercepted; default handling applies.
    PassThrough,
    Respond(StoredResponse),
}

/// A worker generation bound to one [`WorkerConfig`].
///
/// Created once at boot; the configuration never changes afterwards.
pub struct OfflineWorker {
    config: WorkerConfig,
    storage: Arc<dyn CacheStorage>,
    network: Arc<dyn Network>,
    state: RwLock<WorkerState>,
}

impl OfflineWorker {
    pub fn new(
        config: WorkerConfig,
        storage: Arc<dyn CacheStorage>,
        network: Arc<dyn Network>,
    ) -> Self {
        Self {
            config,
            storage,
            network,
            state: RwLock::new(WorkerState::Parsed),
        }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    pub fn storage(&self) -> &Arc<dyn CacheStorage> {
        &self.storage
    }

    pub async fn state(&self) -> WorkerState {
        *self.state.read().await
    }

    async fn set_state(&self, state: WorkerState) {
        let mut current = self.state.write().await;
        let previous = *current;
        if previous != state {
            debug!(from = %previous, to = %state, "Worker state change");
            *current = state;
        }
    }

    /// Populates the versioned bucket with every build/static asset.
    ///
    /// Assets already present are skipped, so re-running install is a no-op
    /// for them. Missing assets are fetched concurrently; if any fetch fails
    /// or answers with a non-2xx status nothing is stored and the install
    /// fails. A failed first install leaves the worker `Redundant`.
    ///
    /// Returns the number of assets added.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Install`] naming the first failing asset, or
    /// [`WorkerError::Cache`] on storage failure.
    pub async fn install(&self) -> Result<usize, WorkerError> {
        let previous = self.state().await;
        let active = previous == WorkerState::Activated;
        if !active {
            self.set_state(WorkerState::Installing).await;
        }

        match self.add_assets_to_cache().await {
            Ok(added) => {
                if !active {
                    self.set_state(WorkerState::Installed).await;
                }
                info!(
                    cache = self.config.cache_name(),
                    added,
                    total = self.config.asset_count(),
                    "Offline worker installed"
                );
                Ok(added)
            }
            Err(e) => {
                if !active {
                    self.set_state(WorkerState::Redundant).await;
                }
                error!(cache = self.config.cache_name(), error = %e, "Offline worker install failed");
                Err(e)
            }
        }
    }

    async fn add_assets_to_cache(&self) -> Result<usize, WorkerError> {
        let cache = self.config.cache_name();
        self.storage.open(cache).await?;

        let mut missing = Vec::new();
        for path in self.config.assets() {
            let url = self.config.resolve(path).map_err(|e| WorkerError::Install {
                url: path.to_string(),
                reason: e.to_string(),
            })?;

            if self.storage.get(cache, &url).await?.is_none() {
                missing.push(url);
            }
        }

        let fetched = try_join_all(missing.into_iter().map(|url| self.fetch_asset(url))).await?;

        let added = fetched.len();
        for (url, response) in fetched {
            self.storage.put(cache, &url, response).await?;
        }

        Ok(added)
    }

    async fn fetch_asset(&self, url: Url) -> Result<(Url, StoredResponse), WorkerError> {
        let response = self
            .network
            .fetch(&FetchRequest::get(url.clone()))
            .await
            .map_err(|e| WorkerError::Install {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status.is_success() {
            return Err(WorkerError::Install {
                url: url.to_string(),
                reason: format!("unexpected status {}", response.status),
            });
        }

        Ok((url, response))
    }

    /// Deletes every bucket other than the current version's.
    ///
    /// Must complete before requests are intercepted. Returns the names of
    /// the deleted buckets.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::InvalidState`] unless the worker is installed
    /// (or already active), and [`WorkerError::Cache`] on storage failure.
    pub async fn activate(&self) -> Result<Vec<String>, WorkerError> {
        let previous = self.state().await;
        if !matches!(previous, WorkerState::Installed | WorkerState::Activated) {
            return Err(WorkerError::InvalidState {
                expected: WorkerState::Installed,
                actual: previous,
            });
        }

        self.set_state(WorkerState::Activating).await;

        match self.delete_old_caches().await {
            Ok(deleted) => {
                self.set_state(WorkerState::Activated).await;
                info!(
                    cache = self.config.cache_name(),
                    deleted = deleted.len(),
                    "Offline worker activated"
                );
                Ok(deleted)
            }
            Err(e) => {
                self.set_state(previous).await;
                error!(error = %e, "Offline worker activation failed");
                Err(e)
            }
        }
    }

    async fn delete_old_caches(&self) -> Result<Vec<String>, WorkerError> {
        let mut deleted = Vec::new();
        for name in self.storage.keys().await? {
            if name != self.config.cache_name() && self.storage.delete(&name).await? {
                debug!(bucket = %name, "Deleted stale cache bucket");
                deleted.push(name);
            }
        }
        Ok(deleted)
    }

    /// Dispatches a control message.
    ///
    /// `SKIP_WAITING` activates an installed worker; in any other state it
    /// is ignored.
    ///
    /// # Errors
    ///
    /// Propagates activation errors.
    pub async fn handle_message(&self, message: WorkerMessage) -> Result<(), WorkerError> {
        match message {
            WorkerMessage::SkipWaiting => {
                let state = self.state().await;
                if state == WorkerState::Installed {
                    info!("Skip waiting requested");
                    self.activate().await?;
                } else {
                    debug!(%state, "Ignoring skip waiting");
                }
                Ok(())
            }
        }
    }

    /// Decides how to answer a request.
    ///
    /// Non-GET requests, browser-extension schemes and requests arriving
    /// before activation pass through. Every intercepted request ends in a
    /// response.
    pub async fn handle_fetch(&self, request: &FetchRequest) -> FetchOutcome {
        if request.method != axum::http::Method::GET {
            return FetchOutcome::PassThrough;
        }

        if EXTENSION_SCHEMES.contains(&request.url.scheme()) {
            return FetchOutcome::PassThrough;
        }

        if !self.state().await.can_intercept_fetch() {
            return FetchOutcome::PassThrough;
        }

        FetchOutcome::Respond(self.respond(request).await)
    }

    async fn respond(&self, request: &FetchRequest) -> StoredResponse {
        let path = request.url.path();

        if self.config.is_asset(path)
            && let Some(cached) = self.match_path(path).await
        {
            metrics::counter!("offline_fetch_total", "outcome" => "asset_cache_hit").increment(1);
            return cached;
        }

        // Shared by all clients: store only anonymous, shareable 200s, and
        // never let a client's Accept-Encoding pick the stored encoding.
        let forwarded = request.with_identity_encoding();
        match self.network.fetch(&forwarded).await {
            Ok(response) => {
                if response.status == axum::http::StatusCode::OK
                    && request.is_http()
                    && !request.carries_credentials()
                    && response.is_shareable()
                {
                    self.store(&request.url, response.clone()).await;
                }
                metrics::counter!("offline_fetch_total", "outcome" => "network").increment(1);
                response
            }
            Err(e) => {
                warn!(url = %request.url, error = %e, "Offline worker fetch failed");
                if let Some(cached) = self.match_path(path).await {
                    metrics::counter!("offline_fetch_total", "outcome" => "fallback_hit")
                        .increment(1);
                    return cached;
                }

                metrics::counter!("offline_fetch_total", "outcome" => "not_found").increment(1);
                StoredResponse::not_found()
            }
        }
    }

    /// Answers a request, forwarding pass-through requests straight to the
    /// network.
    ///
    /// # Errors
    ///
    /// Only pass-through requests can fail; intercepted ones always yield a
    /// response.
    pub async fn fetch_through(&self, request: &FetchRequest) -> Result<StoredResponse, NetworkError> {
        match self.handle_fetch(request).await {
            FetchOutcome::Respond(response) => Ok(response),
            FetchOutcome::PassThrough => self.network.fetch(request).await,
        }
    }

    /// Looks up the current bucket by path. Storage errors count as misses.
    async fn match_path(&self, path: &str) -> Option<StoredResponse> {
        let url = self.config.resolve(path).ok()?;
        match self.storage.get(self.config.cache_name(), &url).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!(%url, error = %e, "Cache lookup failed");
                None
            }
        }
    }

    async fn store(&self, url: &Url, response: StoredResponse) {
        if let Err(e) = self
            .storage
            .put(self.config.cache_name(), url, response)
            .await
        {
            warn!(%url, error = %e, "Failed to store response");
        }
    }
}
