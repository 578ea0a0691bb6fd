//! Client for the external shortening backend.
//!
//! Provides a [`LinkApi`] trait with the reqwest-backed [`HttpLinkApi`].

mod client;
mod error;

pub use client::{HttpLinkApi, LinkApi};
pub use error::ApiError;

#[cfg(test)]
pub use client::MockLinkApi;
