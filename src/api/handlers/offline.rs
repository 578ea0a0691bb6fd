//! Fallback handler proxying requests through the offline cache.

use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::infrastructure::offline::{FetchRequest, OfflineWorker, StoredResponse};
use crate::state::AppState;

/// Largest request body forwarded upstream.
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Serves every request no other route handles.
///
/// # Behavior
///
/// - Offline caching enabled: the request is answered by the
///   [`OfflineWorker`] against `ASSET_ORIGIN` (cache first for build assets,
///   network first otherwise, `404 Not found` when both fail)
/// - Offline caching disabled: `404 Not found`
pub async fn offline_handler(State(state): State<AppState>, request: Request) -> Response {
    match &state.offline {
        Some(worker) => serve_offline(worker, request).await,
        None => StoredResponse::not_found().into_response(),
    }
}

/// Answers `request` through `worker`.
///
/// Requests the worker does not intercept go straight to the origin; if
/// that fails the client receives 502 Bad Gateway.
pub async fn serve_offline(worker: &OfflineWorker, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let url = match worker.config().resolve(path_and_query) {
        Ok(url) => url,
        Err(e) => {
            warn!(uri = %parts.uri, error = %e, "Cannot map request onto asset origin");
            return (StatusCode::BAD_REQUEST, "Bad request").into_response();
        }
    };

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(body) => body,
        Err(_) => return (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large").into_response(),
    };

    let fetch = FetchRequest {
        method: parts.method,
        url,
        headers: parts.headers,
        body,
    };

    match worker.fetch_through(&fetch).await {
        Ok(response) => response.into_response(),
        Err(e) => {
            warn!(url = %fetch.url, error = %e, "Upstream request failed");
            (StatusCode::BAD_GATEWAY, "Bad gateway").into_response()
        }
    }
}
