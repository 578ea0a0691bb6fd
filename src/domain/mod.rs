//! Domain layer: the data the frontend exchanges with the backend and the
//! outcomes it produces.
//!
//! # Architecture
//!
//! - [`entities`] - Link records read from and sent to the backend
//! - [`load_outcome`] - Result of resolving a short-link navigation
//! - [`notification`] - Toasts emitted on invalid user input
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers.

pub mod entities;
pub mod load_outcome;
pub mod notification;

pub use load_outcome::LoadOutcome;
pub use notification::{Notifier, Toast, ToastCollector, ToastKind, ToastPosition};
