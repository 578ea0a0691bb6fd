//! Application services orchestrating calls to the backend.

pub mod link_service;

pub use link_service::LinkService;
