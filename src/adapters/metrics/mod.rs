//! Metrics Adapters
//!
//! Prometheus registry with the `/metrics` scrape endpoint, and the
//! monitor chain that instruments axum handlers with a request counter
//! and a latency histogram.

pub mod monitor;
pub mod registry;

pub use monitor::build_monitor_chain;
pub use registry::{MetricsRegistry, METRICS_PATH};
