//! Thin wrappers around the backend REST endpoints.

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde_json::{Map, Value};
use tracing::{debug, error};
use url::Url;

use super::error::ApiError;

/// Client for the shortening backend.
///
/// # Implementations
///
/// - [`HttpLinkApi`] - reqwest-backed client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkApi: Send + Sync {
    /// Fetches link metadata for a short code.
    ///
    /// `GET {base}/api/v1/info/{code}`
    ///
    /// # Errors
    ///
    /// - [`ApiError::EmptyCode`] if `code` is empty (no request is made)
    /// - [`ApiError::Status`] on a non-2xx response
    /// - [`ApiError::Network`] on transport failure
    /// - [`ApiError::Decode`] if the body is not JSON
    async fn fetch_link_info(&self, code: &str) -> Result<Value, ApiError>;

    /// Creates or updates a short link.
    ///
    /// `POST {base}/api/v1/shorten` with `payload` as the JSON body. The
    /// response body is passed through unchanged.
    ///
    /// # Errors
    ///
    /// Same as [`LinkApi::fetch_link_info`], minus `EmptyCode`.
    async fn update_link_info(&self, payload: Map<String, Value>) -> Result<Value, ApiError>;
}

/// [`LinkApi`] implementation talking HTTP via `reqwest`.
///
/// No retries and no timeouts: a hung backend hangs the caller.
#[derive(Debug, Clone)]
pub struct HttpLinkApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpLinkApi {
    /// Creates a client for the backend at `base_url` (`PUBLIC_API_BASE_URL`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Same as [`HttpLinkApi::new`] with a preconfigured client.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidBaseUrl(base_url.to_string()));
        }

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, ApiError> {
        let response = request
            .send()
            .await
            .map_err(ApiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
            });
        }

        response.json::<Value>().await.map_err(ApiError::Decode)
    }
}

#[async_trait]
impl LinkApi for HttpLinkApi {
    async fn fetch_link_info(&self, code: &str) -> Result<Value, ApiError> {
        if code.is_empty() {
            error!("Refusing to fetch link info for an empty short code");
            return Err(ApiError::EmptyCode);
        }

        let url = self.endpoint(&["api", "v1", "info", code]);
        debug!(%url, "Fetching link info");

        let request = self
            .client
            .get(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        self.send(request)
            .await
            .inspect_err(|e| error!(code, error = %e, "Failed to fetch link info"))
    }

    async fn update_link_info(&self, payload: Map<String, Value>) -> Result<Value, ApiError> {
        let url = self.endpoint(&["api", "v1", "shorten"]);
        debug!(%url, "Submitting link");

        // `json` sets `Content-Type: application/json`.
        self.send(self.client.post(url).json(&payload))
            .await
            .inspect_err(|e| error!(error = %e, "Failed to submit link"))
    }
}
