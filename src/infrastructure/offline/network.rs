//! Network access for the offline worker.

use async_trait::async_trait;
use reqwest::redirect::Policy;
use tracing::debug;

use super::http::{FetchRequest, StoredResponse, strip_hop_by_hop};

/// The request produced no response at all.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Sends requests to the network.
///
/// Any response, whatever its status, is a success; only transport
/// failures are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Network: Send + Sync {
    async fn fetch(&self, request: &FetchRequest) -> Result<StoredResponse, NetworkError>;
}

/// [`Network`] implementation backed by `reqwest`.
///
/// Redirects are not followed so that they reach the caller as-is.
#[derive(Debug, Clone)]
pub struct HttpNetwork {
    client: reqwest::Client,
}

impl HttpNetwork {
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Network for HttpNetwork {
    async fn fetch(&self, request: &FetchRequest) -> Result<StoredResponse, NetworkError> {
        if !request.is_http() {
            return Err(NetworkError::UnsupportedScheme(
                request.url.scheme().to_string(),
            ));
        }

        let mut headers = request.headers.clone();
        strip_hop_by_hop(&mut headers);

        debug!(method = %request.method, url = %request.url, "Network fetch");

        let response = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(headers)
            .body(request.body.clone())
            .send()
            .await?;

        let status = response.status();
        let mut headers = response.headers().clone();
        strip_hop_by_hop(&mut headers);
        let body = response.bytes().await?;

        Ok(StoredResponse::new(status, headers, body))
    }
}
