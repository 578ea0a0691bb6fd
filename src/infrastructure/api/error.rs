//! Errors returned by the backend API client.

/// Failure of a call to the shortening backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    /// The request never produced a response (DNS, connect, TLS, reset...).
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// A 2xx response whose body was not valid JSON.
    #[error("Invalid response body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Short code must not be empty")]
    EmptyCode,

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// The upstream HTTP status, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            _ => None,
        }
    }
}
