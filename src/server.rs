//! HTTP server initialization and runtime setup.
//!
//! Builds the backend client, boots the offline worker and runs the Axum
//! server.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::infrastructure::api::HttpLinkApi;
use crate::infrastructure::offline::{
    AssetManifest, HttpNetwork, MemoryCacheStorage, OfflineWorker, WorkerConfig,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use url::Url;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Backend API client
/// - Offline worker (install + activate, when `ASSET_ORIGIN` is set)
/// - Axum HTTP server
///
/// A failed offline install is logged and the server starts anyway; every
/// request then passes straight through to the asset origin.
///
/// # Errors
///
/// Returns an error if:
/// - The asset manifest cannot be loaded
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let api = HttpLinkApi::new(&config.api_base_url).context("Invalid PUBLIC_API_BASE_URL")?;
    let link_service = Arc::new(LinkService::new(Arc::new(api)));

    let offline = match &config.asset_origin {
        Some(origin) => Some(Arc::new(boot_offline_worker(origin, &config).await?)),
        None => {
            tracing::info!("Offline cache disabled");
            None
        }
    };

    let state = AppState::new(link_service, offline);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Builds the worker from the build manifest and runs install + activate
/// to completion before any request is served.
async fn boot_offline_worker(origin: &str, config: &Config) -> Result<OfflineWorker> {
    let origin = Url::parse(origin).context("Invalid ASSET_ORIGIN")?;
    let manifest = AssetManifest::load(&config.asset_manifest)?;
    let worker_config = WorkerConfig::from_manifest(manifest, origin);

    tracing::info!(
        cache = worker_config.cache_name(),
        assets = worker_config.asset_count(),
        "Booting offline worker"
    );

    let network = HttpNetwork::new().context("Failed to build HTTP client")?;
    let worker = OfflineWorker::new(
        worker_config,
        Arc::new(MemoryCacheStorage::new()),
        Arc::new(network),
    );

    match worker.install().await {
        Ok(_) => {
            worker.activate().await?;
        }
        Err(e) => {
            tracing::warn!("Offline cache unavailable: {}. Requests pass through.", e);
        }
    }

    Ok(worker)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
