//! Application layer: use cases built on top of the domain and the
//! backend client.
//!
//! - [`services::LinkService`] - Link submission and short-link resolution

pub mod services;
