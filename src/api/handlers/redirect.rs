//! Handler for short URL redirect.

use axum::{
    extract::{Path, Request, State},
    response::{IntoResponse, Response},
};

use crate::api::handlers::offline::serve_offline;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// # Request Flow
///
/// 1. If `/{id}` is a known build/static asset, serve it through the offline cache
/// 2. Fetch link info from the backend (blocking the response)
/// 3. Return 307 Temporary Redirect to `longUrl` before any page content renders
///
/// # Errors
///
/// Renders the error page with:
/// - the backend's status if it answered with a non-2xx status
/// - 502 Bad Gateway if the backend could not be reached
/// - 404 Not Found if the link does not exist or was not successful
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Request,
) -> Response {
    if let Some(worker) = &state.offline
        && worker.config().is_asset(request.uri().path())
    {
        return serve_offline(worker, request).await;
    }

    state
        .link_service
        .resolve_redirect(Some(&id))
        .await
        .into_response()
}
