//! HTML rendering of short-link page loads.

use askama::Template;
use askama_web::WebTemplate;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::domain::LoadOutcome;

/// Template for the error page shown when a short link cannot be resolved.
///
/// Renders `templates/error.html` with the status and message.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub status: u16,
    pub message: String,
}

impl IntoResponse for LoadOutcome {
    /// Redirects carry no body; errors render [`ErrorPage`] with the
    /// outcome's status.
    fn into_response(self) -> Response {
        match self {
            LoadOutcome::Redirect { location, status } => {
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::TEMPORARY_REDIRECT);
                (status, [(header::LOCATION, location)]).into_response()
            }
            LoadOutcome::Error { status, message } => {
                let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                (code, ErrorPage { status, message }).into_response()
            }
        }
    }
}
