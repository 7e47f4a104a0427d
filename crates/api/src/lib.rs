//! HTTP API layer for desk.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: complaint lifecycle, directories, notifications, auth
//! - **Extractors**: authentication
//! - **Middleware**: bearer-token resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
