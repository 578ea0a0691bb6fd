//! API route configuration.

use crate::api::handlers::shorten_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Validate a URL and submit it to the backend
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}
