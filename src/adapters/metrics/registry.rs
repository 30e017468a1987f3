//! Prometheus Metrics Registry - Explicit Registry and Scrape Endpoint
//!
//! Wraps a `prometheus::Registry` so callers pass the registry around
//! instead of relying on a process-wide default. Registering the same
//! metric twice is an error, never silently ignored. The `/metrics`
//! route is installed by an explicit call from the entry point.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use prometheus::core::Collector;
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, Registry, TextEncoder};
use tracing::{debug, error, info};

use crate::domain::MonitorError;

/// Route polled by the Prometheus server.
pub const METRICS_PATH: &str = "/metrics";

/// Shared metrics registry.
///
/// Cloning is cheap: clones share the same underlying collectors.
#[derive(Clone, Default)]
pub struct MetricsRegistry {
    /// Prometheus registry.
    registry: Registry,
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry").finish_non_exhaustive()
    }
}

impl MetricsRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collector and hand it back for use.
    ///
    /// # Errors
    /// Returns [`MonitorError::AlreadyRegistered`] when a collector with
    /// the same descriptor is already present, or
    /// [`MonitorError::Prometheus`] for any other conflict.
    pub fn register<C>(&self, collector: C) -> Result<C, MonitorError>
    where
        C: Collector + Clone + 'static,
    {
        self.register_boxed(Box::new(collector.clone()))?;
        Ok(collector)
    }

    /// Register a collector that is not kept by the caller.
    ///
    /// The reported name is the first descriptor's fully-qualified name.
    fn register_boxed(&self, collector: Box<dyn Collector>) -> Result<(), MonitorError> {
        let name = collector
            .desc()
            .first()
            .map(|desc| desc.fq_name.clone())
            .unwrap_or_default();

        match self.registry.register(collector) {
            Ok(()) => {
                debug!(metric = %name, "Metric registered");
                Ok(())
            }
            Err(prometheus::Error::AlreadyReg) => Err(MonitorError::AlreadyRegistered { name }),
            Err(e) => Err(e.into()),
        }
    }

    /// Register the process collector (CPU, memory, fds, start time).
    ///
    /// Only available on Linux; a no-op elsewhere.
    ///
    /// # Errors
    /// Fails if the process collector was already registered.
    pub fn register_process_collector(&self) -> Result<(), MonitorError> {
        #[cfg(target_os = "linux")]
        {
            let collector = prometheus::process_collector::ProcessCollector::for_self();
            self.register_boxed(Box::new(collector))?;
        }
        #[cfg(not(target_os = "linux"))]
        debug!("Process collector unavailable on this platform");

        Ok(())
    }

    /// Snapshot of every registered metric family.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Render every registered metric in the text exposition format.
    ///
    /// # Errors
    /// Fails if the encoder rejects a family or emits invalid UTF-8.
    pub fn encode_text(&self) -> Result<String, MonitorError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// Add the `GET /metrics` scrape route to `router`.
    ///
    /// Call once per router; axum panics on a duplicate route.
    pub fn install_scrape_endpoint<S>(&self, router: Router<S>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        let metrics = self.clone();
        info!(path = METRICS_PATH, "Scrape endpoint installed");

        router.route(
            METRICS_PATH,
            get(move || {
                let metrics = metrics.clone();
                async move { metrics.scrape() }
            }),
        )
    }

    fn scrape(&self) -> axum::response::Response {
        match self.encode_text() {
            Ok(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
                body,
            )
                .into_response(),
            Err(e) => {
                error!(error = %e, "Failed to encode metrics");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}
