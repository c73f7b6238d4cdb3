//! HTTP API layer for chatter.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: per-resource handler modules with an explicit
//!   dispatch table
//! - **Extractors**: authentication from request extensions
//! - **Middleware**: bearer-token session resolution
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::router;
pub use middleware::{AppState, auth_middleware};
