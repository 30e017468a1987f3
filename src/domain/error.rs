//! Monitor Errors - Registration and Selection Failures
//!
//! The only fatal condition is registering a metric twice in the same
//! registry. Nothing here is raised per request.

use thiserror::Error;

/// Errors raised while building a monitor chain or serving metrics.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// A collector with the same name and constant labels is already
    /// registered.
    #[error("metric `{name}` is already registered")]
    AlreadyRegistered {
        /// Fully-qualified metric name.
        name: String,
    },

    /// Selection key that is neither a known metric nor the wildcard.
    #[error("unknown metric `{0}` in selection")]
    UnknownMetric(String),

    /// Any other failure from the metrics library.
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),

    /// Text exposition produced invalid UTF-8.
    #[error("metrics exposition is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}
