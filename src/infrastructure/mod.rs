//! Infrastructure layer: external integrations.
//!
//! - [`api`] - HTTP client for the shortening backend
//! - [`offline`] - Versioned offline asset cache

pub mod api;
pub mod offline;
