//! Helper functions shared by the server and the CLI.
//!
//! - [`url_validation`] - Syntactic validation of user-entered URLs

pub mod url_validation;
