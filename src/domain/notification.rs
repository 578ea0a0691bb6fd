//! User-facing notifications.
//!
//! Validation failures are never returned as errors; they are reported as
//! transient toasts through a [`Notifier`] and the caller receives `false`.

use serde::Serialize;
use std::sync::Mutex;

/// Severity of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
}

/// Fixed screen location of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopCenter,
    BottomCenter,
}

/// A transient, dismissible notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub position: ToastPosition,
}

impl Toast {
    pub fn error(message: impl Into<String>, position: ToastPosition) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
            position,
        }
    }

    pub fn success(message: impl Into<String>, position: ToastPosition) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
            position,
        }
    }
}

/// Sink for toasts.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Collects toasts so they can be returned in an HTTP response body.
#[derive(Debug, Default)]
pub struct ToastCollector {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the collector, returning every toast in emission order.
    pub fn into_toasts(self) -> Vec<Toast> {
        self.toasts
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Notifier for ToastCollector {
    fn notify(&self, toast: Toast) {
        let mut toasts = self
            .toasts
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        toasts.push(toast);
    }
}
