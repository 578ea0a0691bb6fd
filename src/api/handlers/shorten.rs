//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use validator::Validate;

use crate::api::dto::shorten::ShortenRequest;
use crate::domain::ToastCollector;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validation::{INVALID_URL_MESSAGE, candidate_url, validate_url};

/// Submits a long URL to the backend.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "example.com/page",
///   "customAlias": "my-link",        // optional
///   "expiresAt": "2030-01-01T00:00:00Z" // optional
/// }
/// ```
///
/// # Response
///
/// The backend's JSON result, passed through unchanged.
///
/// # Errors
///
/// - 400 Bad Request if the URL is invalid; `error.details.toasts` carries
///   the notification to display
/// - 400 Bad Request if the alias fails validation
/// - the backend's status on non-2xx backend responses, 502 if unreachable
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<Value>, AppError> {
    payload.validate()?;

    let toasts = ToastCollector::new();
    let Some(long_url) = validate_url(&payload.long_url, &toasts)
        .then(|| candidate_url(&payload.long_url))
        .flatten()
    else {
        return Err(AppError::bad_request(
            INVALID_URL_MESSAGE,
            json!({ "field": "longUrl", "toasts": toasts.into_toasts() }),
        ));
    };

    let result = state
        .link_service
        .create_link(payload.into_new_link(long_url))
        .await?;

    Ok(Json(result))
}
