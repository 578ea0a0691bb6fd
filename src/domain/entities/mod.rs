//! Data structures exchanged with the shortening backend.
//!
//! - [`LinkInfo`] - Link metadata read by the redirect resolver
//! - [`NewLink`] - Input for creating a short link

pub mod link;

pub use link::{LinkInfo, NewLink};
