//! DTOs for link shortening endpoint.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::NewLink;

/// Compiled regex for custom alias validation.
static CUSTOM_ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("alias regex is valid"));

/// Request to shorten a URL.
///
/// ```json
/// {
///   "longUrl": "example.com/some/page",
///   "customAlias": "my-link",
///   "expiresAt": "2030-01-01T00:00:00Z"
/// }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The URL as typed by the user; checked with
    /// [`crate::utils::url_validation::validate_url`].
    #[validate(length(max = 2048, message = "URL is too long"))]
    pub long_url: String,

    /// Optional custom short code.
    #[validate(length(min = 3, max = 50))]
    #[validate(regex(path = *CUSTOM_ALIAS_REGEX, message = "Alias may only contain letters, digits, '-' and '_'"))]
    pub custom_alias: Option<String>,

    /// Optional expiry timestamp.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ShortenRequest {
    /// Converts the request into the backend payload, using `long_url` as
    /// the (already validated and prefixed) target.
    pub fn into_new_link(self, long_url: String) -> NewLink {
        NewLink {
            long_url,
            custom_alias: self.custom_alias,
            expires_at: self.expires_at,
        }
    }
}
