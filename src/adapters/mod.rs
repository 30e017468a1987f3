//! Adapters Layer - Metrics Library and HTTP Transport
//!
//! Binds the domain selection types to the outside world.
//!
//! Adapter categories:
//! - `metrics`: Prometheus registry, scrape endpoint and monitor chain
//! - `http`: axum server hosting the instrumented routes

pub mod http;
pub mod metrics;
