use std::sync::Arc;

use crate::application::services::LinkService;
use crate::infrastructure::offline::OfflineWorker;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// `None` when offline asset caching is disabled.
    pub offline: Option<Arc<OfflineWorker>>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, offline: Option<Arc<OfflineWorker>>) -> Self {
        Self {
            link_service,
            offline,
        }
    }
}
