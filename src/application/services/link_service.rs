//! Link submission and short-link resolution.

use std::sync::Arc;

use crate::domain::LoadOutcome;
use crate::domain::entities::{LinkInfo, NewLink};
use crate::error::AppError;
use crate::infrastructure::api::{ApiError, LinkApi};
use serde_json::Value;
use tracing::{debug, info};

/// Status reported when the backend could not be reached at all.
const BAD_GATEWAY: u16 = 502;

/// Service for creating links and resolving short codes through the
/// backend API.
pub struct LinkService {
    api: Arc<dyn LinkApi>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(api: Arc<dyn LinkApi>) -> Self {
        Self { api }
    }

    /// Submits a new short link and passes the backend result through.
    ///
    /// The URL is expected to have been validated already.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] carrying the backend status on non-2xx
    /// responses, or 502 when the backend could not be reached.
    pub async fn create_link(&self, link: NewLink) -> Result<Value, AppError> {
        let result = self.api.update_link_info(link.to_payload()).await?;
        info!(long_url = %link.long_url, "Short link submitted");
        Ok(result)
    }

    /// Fetches link metadata for display.
    ///
    /// # Errors
    ///
    /// See [`LinkService::create_link`]. An empty code is a validation error.
    pub async fn link_info(&self, code: &str) -> Result<LinkInfo, AppError> {
        let body = self.api.fetch_link_info(code).await?;
        Ok(LinkInfo::from_json(&body))
    }

    /// Resolves a `/{id}` navigation into a redirect or an error.
    ///
    /// # Outcomes
    ///
    /// - missing or blank id: 400, no backend call
    /// - backend non-2xx: error with the backend's status
    /// - backend unreachable or invalid body: 502
    /// - `success` with a `longUrl`: 307 redirect to it
    /// - anything else: 404
    pub async fn resolve_redirect(&self, id: Option<&str>) -> LoadOutcome {
        let Some(id) = id.filter(|id| !id.trim().is_empty()) else {
            return LoadOutcome::error(400, "Link ID is required");
        };

        let body = match self.api.fetch_link_info(id).await {
            Ok(body) => body,
            Err(ApiError::Status { status }) => {
                return LoadOutcome::error(status, "Failed to fetch link info");
            }
            Err(ApiError::EmptyCode) => return LoadOutcome::error(400, "Link ID is required"),
            Err(_) => return LoadOutcome::error(BAD_GATEWAY, "Failed to fetch link info"),
        };

        match LinkInfo::from_json(&body).redirect_target() {
            Some(long_url) => {
                debug!(id, long_url, "Redirecting short link");
                LoadOutcome::redirect(long_url)
            }
            None => LoadOutcome::error(404, "Link not found"),
        }
    }
}
