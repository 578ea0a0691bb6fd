//! Request and response values handled by the offline worker.

use axum::http::header::{self, HeaderName};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use url::Url;

/// Headers that describe a single connection and must not be forwarded or
/// stored.
const HOP_BY_HOP: &[HeaderName] = &[
    header::CONNECTION,
    header::TRANSFER_ENCODING,
    header::CONTENT_LENGTH,
    header::HOST,
    header::UPGRADE,
    header::TE,
    header::TRAILER,
    header::PROXY_AUTHORIZATION,
];

/// Removes connection-scoped headers in place.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

/// An intercepted request.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl FetchRequest {
    /// A bodiless GET for `url`.
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    pub fn is_http(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }

    /// Whether the request identifies a user (`Cookie` or `Authorization`).
    pub fn carries_credentials(&self) -> bool {
        self.headers.contains_key(header::COOKIE) || self.headers.contains_key(header::AUTHORIZATION)
    }

    /// Copy of the request asking the origin for an unencoded body.
    pub fn with_identity_encoding(&self) -> Self {
        let mut request = self.clone();
        request.headers.remove(header::ACCEPT_ENCODING);
        request
    }
}

/// A response as returned by the network or stored in a cache bucket.
///
/// Cloning is cheap: the body is reference counted.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl StoredResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// The synthetic response used when neither network nor cache answers.
    pub fn not_found() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        Self::new(StatusCode::NOT_FOUND, headers, Bytes::from_static(b"Not found"))
    }

    /// Whether the response may be stored in a cache shared by all clients.
    ///
    /// Rejects `Set-Cookie`, `Cache-Control: private` or `no-store`, and any
    /// `Vary` other than `Accept-Encoding`.
    pub fn is_shareable(&self) -> bool {
        if self.headers.contains_key(header::SET_COOKIE) {
            return false;
        }

        let private = header_tokens(&self.headers, header::CACHE_CONTROL)
            .any(|directive| directive == "private" || directive == "no-store");
        if private {
            return false;
        }

        header_tokens(&self.headers, header::VARY).all(|field| field == "accept-encoding")
    }
}

/// Lowercased comma-separated tokens of every value of `name`, without
/// directive arguments.
fn header_tokens(headers: &HeaderMap, name: HeaderName) -> impl Iterator<Item = String> + '_ {
    headers
        .get_all(name)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(|token| {
            token
                .split('=')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
        .filter(|token| !token.is_empty())
}

impl IntoResponse for StoredResponse {
    fn into_response(self) -> Response {
        let mut headers = self.headers;
        strip_hop_by_hop(&mut headers);
        (self.status, headers, self.body).into_response()
    }
}
