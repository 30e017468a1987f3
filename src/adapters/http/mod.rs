//! HTTP Adapters
//!
//! axum server hosting the instrumented hello route and the
//! Prometheus scrape endpoint.

pub mod server;

pub use server::{build_app, HttpServer};
