//! Syntactic validation of user-entered URLs.
//!
//! Runs before anything is submitted to the backend. No network calls are
//! made; the only side effect is a toast on invalid input.

use crate::domain::{Notifier, Toast, ToastPosition};
use url::Url;

/// Message shown for every rejected URL.
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL format";

/// Returns the string that is actually parsed for `raw`, if it parses.
///
/// The input is trimmed and, when it carries neither an `http://` nor an
/// `https://` prefix, `https://` is prepended.
///
/// # Examples
///
/// ```
/// use shortlink_web::utils::url_validation::candidate_url;
///
/// assert_eq!(candidate_url("  example.com "), Some("https://example.com".to_string()));
/// assert_eq!(candidate_url("http://example.com"), Some("http://example.com".to_string()));
/// assert_eq!(candidate_url("   "), None);
/// ```
pub fn candidate_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    Url::parse(&candidate).ok().map(|_| candidate)
}

/// Checks whether `raw` is a usable URL.
///
/// On invalid input an error toast is sent to `notifier` (bottom-center)
/// and `false` is returned. Never panics and never returns an error.
pub fn validate_url(raw: &str, notifier: &dyn Notifier) -> bool {
    if candidate_url(raw).is_some() {
        return true;
    }

    tracing::debug!(input = raw, "Rejected URL input");
    notifier.notify(Toast::error(INVALID_URL_MESSAGE, ToastPosition::BottomCenter));
    false
}
