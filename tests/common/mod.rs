#![allow(dead_code)]

use async_trait::async_trait;
use axum::http::{HeaderMap, StatusCode, header::COOKIE};
use serde_json::{Map, Value};
use shortlink_web::application::services::LinkService;
use shortlink_web::infrastructure::api::{ApiError, HttpLinkApi, LinkApi};
use shortlink_web::infrastructure::offline::{
    FetchRequest, MemoryCacheStorage, Network, NetworkError, OfflineWorker, StoredResponse,
    WorkerConfig,
};
use shortlink_web::state::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use url::Url;

pub const ORIGIN: &str = "https://app.example.com";

/// Canned backend: every call returns the configured result.
pub struct StubLinkApi {
    info: Result<Value, u16>,
    shorten: Result<Value, u16>,
    pub calls: AtomicUsize,
    pub last_payload: Mutex<Option<Map<String, Value>>>,
}

impl StubLinkApi {
    pub fn new() -> Self {
        Self {
            info: Err(404),
            shorten: Err(500),
            calls: AtomicUsize::new(0),
            last_payload: Mutex::new(None),
        }
    }

    pub fn with_info(mut self, info: Value) -> Self {
        self.info = Ok(info);
        self
    }

    pub fn with_info_status(mut self, status: u16) -> Self {
        self.info = Err(status);
        self
    }

    pub fn with_shorten(mut self, result: Value) -> Self {
        self.shorten = Ok(result);
        self
    }

    pub fn with_shorten_status(mut self, status: u16) -> Self {
        self.shorten = Err(status);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> Option<Map<String, Value>> {
        self.last_payload.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkApi for StubLinkApi {
    async fn fetch_link_info(&self, _code: &str) -> Result<Value, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.info
            .clone()
            .map_err(|status| ApiError::Status { status })
    }

    async fn update_link_info(&self, payload: Map<String, Value>) -> Result<Value, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = Some(payload);
        self.shorten
            .clone()
            .map_err(|status| ApiError::Status { status })
    }
}

/// Origin server stand-in with a switchable connection.
pub struct FakeNetwork {
    routes: HashMap<String, (StatusCode, &'static str)>,
    sessions: Vec<String>,
    offline: AtomicBool,
    pub fetches: AtomicUsize,
    pub last_headers: Mutex<Option<HeaderMap>>,
}

impl FakeNetwork {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            sessions: Vec::new(),
            offline: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
            last_headers: Mutex::new(None),
        }
    }

    /// Serves `path` as a page rendered for the request's `Cookie`.
    pub fn session_page(mut self, path: &str) -> Self {
        self.sessions.push(path.to_string());
        self
    }

    pub fn last_headers(&self) -> Option<HeaderMap> {
        self.last_headers.lock().unwrap().clone()
    }

    pub fn route(mut self, path: &str, status: StatusCode, body: &'static str) -> Self {
        self.routes.insert(path.to_string(), (status, body));
        self
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Network for FakeNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<StoredResponse, NetworkError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(NetworkError::UnsupportedScheme("offline".to_string()));
        }

        *self.last_headers.lock().unwrap() = Some(request.headers.clone());

        if self.sessions.iter().any(|path| path == request.url.path()) {
            let session = request
                .headers
                .get(COOKIE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("anonymous");
            let body = format!("dashboard of {session}");
            return Ok(StoredResponse::new(StatusCode::OK, HeaderMap::new(), body));
        }

        let response = match self.routes.get(request.url.path()) {
            Some((status, body)) => StoredResponse::new(*status, HeaderMap::new(), *body),
            None => StoredResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), "origin 404"),
        };
        Ok(response)
    }
}

pub fn origin() -> Url {
    Url::parse(ORIGIN).unwrap()
}

/// Network serving the two assets used by [`asset_config`].
pub fn asset_network() -> FakeNetwork {
    FakeNetwork::new()
        .route("/app.js", StatusCode::OK, "console.log('app')")
        .route("/favicon.png", StatusCode::OK, "png")
}

pub fn asset_config(version: &str) -> WorkerConfig {
    WorkerConfig::new(version, origin(), ["/app.js", "/favicon.png"])
}

pub fn worker_with(
    config: WorkerConfig,
    storage: Arc<MemoryCacheStorage>,
    network: Arc<FakeNetwork>,
) -> OfflineWorker {
    OfflineWorker::new(config, storage, network)
}

/// Installed and activated worker over [`asset_network`].
pub async fn active_worker(network: Arc<FakeNetwork>) -> Arc<OfflineWorker> {
    let worker = worker_with(
        asset_config("1"),
        Arc::new(MemoryCacheStorage::new()),
        network,
    );
    worker.install().await.unwrap();
    worker.activate().await.unwrap();
    Arc::new(worker)
}

pub fn create_test_state(api: Arc<dyn LinkApi>, offline: Option<Arc<OfflineWorker>>) -> AppState {
    AppState::new(Arc::new(LinkService::new(api)), offline)
}

/// Backend client pointed at a port nothing listens on.
pub async fn unreachable_api() -> Arc<dyn LinkApi> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Arc::new(HttpLinkApi::new(&format!("http://{addr}")).unwrap())
}

/// Backend client pointed at a server answering every request with HTML.
pub async fn html_api() -> Arc<dyn LinkApi> {
    let app = axum::Router::new().fallback(|| async { "<html>maintenance</html>" });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Arc::new(HttpLinkApi::new(&format!("http://{addr}")).unwrap())
}
