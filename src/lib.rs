//! HTTP Monitor Chain — Library Root
//!
//! Re-exports all modules for integration tests and benchmarks.

pub mod adapters;
pub mod config;
pub mod domain;

pub use adapters::metrics::{build_monitor_chain, MetricsRegistry};
pub use domain::{MetricName, MetricSelection, MonitorError};
