//! Domain layer - Metric selection and error taxonomy.
//!
//! Pure types shared by the adapters. Nothing here touches the
//! network or a metrics registry.

pub mod error;
pub mod selection;

// Re-export core types for convenience
pub use error::MonitorError;
pub use selection::{MetricName, MetricSelection};
