//! Browser-facing HTML responses.
//!
//! Uses Askama templates for server-side rendering.
//!
//! - [`error_page`] - Error page for unresolvable short links

pub mod error_page;
