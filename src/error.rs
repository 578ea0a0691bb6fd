//! Application error type rendered as JSON HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::infrastructure::api::ApiError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload: `{ code, message, details }`.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    /// The backend failed; carries its status (or 502 when it never answered).
    Upstream {
        status: StatusCode,
        message: String,
        details: Value,
    },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn upstream(status: StatusCode, message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { status, .. } => *status,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Upstream {
                message, details, ..
            } => ("upstream_error", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.to_error_info();
        write!(f, "{}: {}", info.code, info.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let details = serde_json::to_value(errors.field_errors()).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Validation failed", details)
    }
}

impl From<ApiError> for AppError {
    fn from(error: ApiError) -> Self {
        match error {
            ApiError::Status { status } => AppError::upstream(
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                "Backend request failed",
                json!({ "upstream_status": status }),
            ),
            ApiError::EmptyCode => AppError::bad_request("Link ID is required", json!({})),
            ApiError::InvalidBaseUrl(reason) => {
                AppError::internal("Backend is misconfigured", json!({ "reason": reason }))
            }
            ApiError::Network(e) | ApiError::Decode(e) => AppError::upstream(
                StatusCode::BAD_GATEWAY,
                "Backend unavailable",
                json!({ "reason": e.to_string() }),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::not_found("x", json!({})).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::upstream(StatusCode::CONFLICT, "x", json!({})).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::internal("x", json!({})).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_status_error_keeps_upstream_status() {
        let error = AppError::from(ApiError::Status { status: 409 });
        assert_eq!(error.status(), StatusCode::CONFLICT);
        assert_eq!(error.to_error_info().details, json!({ "upstream_status": 409 }));
    }

    #[test]
    fn test_error_info_code() {
        let info = AppError::bad_request("Please enter a valid URL format", json!({})).to_error_info();
        assert_eq!(info.code, "validation_error");
        assert_eq!(info.message, "Please enter a valid URL format");
    }
}
