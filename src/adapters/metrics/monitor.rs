//! Monitor Chain - Request Counting and Latency Timing Around a Handler
//!
//! Builds a wrapper around an axum handler that records
//! `api_requests_total{code, method}` and
//! `response_duration_seconds{handler="api", method}`.
//!
//! Layer order, outermost first:
//! 1. Counting layer - increments the counter with the final status code
//! 2. Duration layer - observes wall-clock seconds spent in the handler
//! 3. The original handler

use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::MethodRouter;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts};
use tracing::{debug, info};

use super::registry::MetricsRegistry;
use crate::domain::{MetricName, MetricSelection, MonitorError};

/// Constant `handler` label attached to the latency histogram.
pub const HANDLER_LABEL: &str = "api";

/// `method` label for anything outside the standard HTTP methods.
pub const UNKNOWN_METHOD: &str = "unknown";

/// Label value for a request method.
///
/// Extension methods collapse into [`UNKNOWN_METHOD`] so clients cannot
/// mint new series.
pub fn method_label(method: &Method) -> &'static str {
    match method.as_str() {
        "GET" => "GET",
        "HEAD" => "HEAD",
        "POST" => "POST",
        "PUT" => "PUT",
        "DELETE" => "DELETE",
        "CONNECT" => "CONNECT",
        "OPTIONS" => "OPTIONS",
        "TRACE" => "TRACE",
        "PATCH" => "PATCH",
        _ => UNKNOWN_METHOD,
    }
}

/// Build the request counter, labeled by status code and method.
///
/// # Errors
/// Only fails if the metric options are malformed.
pub fn requests_total_counter() -> Result<IntCounterVec, MonitorError> {
    let counter = IntCounterVec::new(
        Opts::new(
            MetricName::ApiRequestsTotal.as_str(),
            "A counter for requests to the wrapped handler.",
        ),
        &["code", "method"],
    )?;
    Ok(counter)
}

/// Build the latency histogram, labeled by method, with default buckets.
///
/// # Errors
/// Only fails if the metric options are malformed.
pub fn response_duration_histogram() -> Result<HistogramVec, MonitorError> {
    let histogram = HistogramVec::new(
        HistogramOpts::new(
            MetricName::ResponseDurationSeconds.as_str(),
            "A histogram of request latencies.",
        )
        .const_label("handler", HANDLER_LABEL)
        .buckets(prometheus::DEFAULT_BUCKETS.to_vec()),
        &["method"],
    )?;
    Ok(histogram)
}

/// Wrap `handler` with the instruments enabled by `selection`.
///
/// When `enabled` is false the handler is returned untouched and the
/// registry is not modified. Otherwise each selected metric is
/// registered in `registry` and attached as a layer.
///
/// # Errors
/// Returns [`MonitorError::AlreadyRegistered`] if a selected metric is
/// already present in `registry`, e.g. when a second chain is built
/// against the same registry with overlapping metrics.
pub fn build_monitor_chain<S>(
    registry: &MetricsRegistry,
    selection: &MetricSelection,
    handler: MethodRouter<S>,
    enabled: bool,
) -> Result<MethodRouter<S>, MonitorError>
where
    S: Clone + Send + Sync + 'static,
{
    if !enabled {
        debug!("Monitoring disabled, handler left unwrapped");
        return Ok(handler);
    }

    let counter = if selection.enables(MetricName::ApiRequestsTotal) {
        Some(registry.register(requests_total_counter()?)?)
    } else {
        None
    };

    let histogram = if selection.enables(MetricName::ResponseDurationSeconds) {
        Some(registry.register(response_duration_histogram()?)?)
    } else {
        None
    };

    info!(
        requests_total = counter.is_some(),
        response_duration = histogram.is_some(),
        "Monitor chain built"
    );

    // Layers added later run first, so the duration layer goes on before
    // the counting layer.
    let mut chain = handler;
    if let Some(histogram) = histogram {
        chain = chain.layer(middleware::from_fn_with_state(histogram, observe_duration));
    }
    if let Some(counter) = counter {
        chain = chain.layer(middleware::from_fn_with_state(counter, count_requests));
    }

    Ok(chain)
}

/// Increment `api_requests_total` once the inner service has responded.
async fn count_requests(
    State(counter): State<IntCounterVec>,
    request: Request,
    next: Next,
) -> Response {
    let method = method_label(request.method());
    let response = next.run(request).await;

    counter
        .with_label_values(&[response.status().as_str(), method])
        .inc();

    response
}

/// Observe the inner handler's wall-clock time in seconds.
async fn observe_duration(
    State(histogram): State<HistogramVec>,
    request: Request,
    next: Next,
) -> Response {
    let method = method_label(request.method());
    let start = Instant::now();
    let response = next.run(request).await;

    histogram
        .with_label_values(&[method])
        .observe(start.elapsed().as_secs_f64());

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use prometheus::core::Collector;

    #[test]
    fn test_counter_descriptor() {
        let counter = requests_total_counter().unwrap();
        let desc = counter.desc()[0];
        assert_eq!(desc.fq_name, "api_requests_total");
        assert_eq!(desc.variable_labels, vec!["code", "method"]);
    }

    #[test]
    fn test_histogram_descriptor() {
        let histogram = response_duration_histogram().unwrap();
        let desc = histogram.desc()[0];
        assert_eq!(desc.fq_name, "response_duration_seconds");
        assert_eq!(desc.variable_labels, vec!["method"]);
        assert_eq!(desc.const_label_pairs.len(), 1);
        assert_eq!(desc.const_label_pairs[0].get_name(), "handler");
        assert_eq!(desc.const_label_pairs[0].get_value(), HANDLER_LABEL);
    }

    #[test]
    fn test_method_label_collapses_extensions() {
        assert_eq!(method_label(&Method::GET), "GET");
        assert_eq!(method_label(&Method::PATCH), "PATCH");
        assert_eq!(method_label(&Method::from_bytes(b"PURGE").unwrap()), UNKNOWN_METHOD);
        assert_eq!(method_label(&Method::from_bytes(b"X0").unwrap()), UNKNOWN_METHOD);
    }

    #[test]
    fn test_disabled_chain_registers_nothing() {
        let registry = MetricsRegistry::new();
        let handler: MethodRouter = axum::routing::get(|| async { "ok" });

        build_monitor_chain(&registry, &MetricSelection::all(), handler, false).unwrap();

        assert!(registry
            .register(requests_total_counter().unwrap())
            .is_ok());
        assert!(registry
            .register(response_duration_histogram().unwrap())
            .is_ok());
    }
}
