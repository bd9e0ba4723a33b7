//! Request-time access gate for a content-delivery edge.
//!
//! Each viewer request either passes through unchanged (valid session cookie)
//! or is answered with a `302` to the authentication portal carrying the
//! original URL in `cdn_resource`.
//!
//! The core lives in [`services::gate`]; [`services::settings`] resolves the
//! signing secret and portal URL per invocation. The rest is a small axum host
//! that accepts viewer-request events over HTTP.

pub mod api;
pub mod app;
pub mod config;
pub mod edge;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
