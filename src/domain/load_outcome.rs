//! Result of resolving a short-link page load.

/// HTTP status used for short-link redirects (307 Temporary Redirect).
pub const TEMPORARY_REDIRECT: u16 = 307;

/// What the hosting router should do for a `/{id}` navigation.
///
/// The page never renders markup on the happy path: it either redirects
/// or fails with a status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Redirect { location: String, status: u16 },
    Error { status: u16, message: String },
}

impl LoadOutcome {
    /// A 307 redirect to `location`.
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::Redirect {
            location: location.into(),
            status: TEMPORARY_REDIRECT,
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self::Error {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Redirect { status, .. } | Self::Error { status, .. } => *status,
        }
    }
}
