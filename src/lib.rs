//! # shortlink-web
//!
//! Web frontend for a URL shortening service, built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Link records, load outcomes, notifications
//! - **Application Layer** ([`application`]) - Link submission and redirect resolution
//! - **Infrastructure Layer** ([`infrastructure`]) - Backend API client and offline asset cache
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//! - **Web Layer** ([`web`]) - HTML error page
//!
//! ## Features
//!
//! - `GET /{id}` resolves short codes through the backend and answers with a 307
//! - `POST /api/shorten` validates URLs before submitting them
//! - Versioned offline cache for the site's build/static assets
//!   (cache first for assets, network first with cache fallback otherwise)
//!
//! ## Quick Start
//!
//! ```bash
//! export PUBLIC_API_BASE_URL="https://api.short.example"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkService;
    pub use crate::domain::entities::{LinkInfo, NewLink};
    pub use crate::domain::{LoadOutcome, Notifier, Toast};
    pub use crate::error::AppError;
    pub use crate::infrastructure::api::{ApiError, HttpLinkApi, LinkApi};
    pub use crate::infrastructure::offline::{OfflineWorker, WorkerConfig};
    pub use crate::state::AppState;
}
