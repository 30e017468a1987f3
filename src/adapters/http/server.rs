//! HTTP Server - Instrumented Routes and Scrape Endpoint
//!
//! Serves `/hello` wrapped by the monitor chain and `/metrics` for the
//! Prometheus server, on a single listener.

use axum::routing::get;
use axum::Router;
use tokio::sync::broadcast;
use tracing::{info, instrument};

use crate::adapters::metrics::{build_monitor_chain, MetricsRegistry};
use crate::config::AppConfig;
use crate::domain::MonitorError;

/// Route of the demo handler.
pub const HELLO_PATH: &str = "/hello";

/// Demo handler wrapped by the monitor chain.
async fn hello() -> &'static str {
    "Hello, there!"
}

/// Compose the application router.
///
/// Wraps the hello handler per `config.monitor`, then installs the
/// scrape endpoint once.
///
/// # Errors
/// Fails if a selected metric is already registered in `registry`.
pub fn build_app(config: &AppConfig, registry: &MetricsRegistry) -> Result<Router, MonitorError> {
    let hello_route = build_monitor_chain(
        registry,
        &config.monitor.metrics,
        get(hello),
        config.monitor.enabled,
    )?;

    let router = Router::new().route(HELLO_PATH, hello_route);
    Ok(registry.install_scrape_endpoint(router))
}

/// Axum-based HTTP server.
pub struct HttpServer {
    /// Fully composed router.
    app: Router,
    /// Listener address.
    bind_address: String,
}

impl HttpServer {
    /// Create a new server for an already composed router.
    pub fn new(app: Router, bind_address: String) -> Self {
        Self { app, bind_address }
    }

    /// Serve until a shutdown signal arrives.
    #[instrument(skip(self, shutdown_rx), fields(address = %self.bind_address))]
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(&self.bind_address).await?;
        info!(address = %self.bind_address, "HTTP server started");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::parse_config;

    #[test]
    fn test_build_app_twice_on_same_registry_fails() {
        let config = parse_config("[server]\nname = \"demo\"\n").unwrap();
        let registry = MetricsRegistry::new();

        build_app(&config, &registry).unwrap();
        let Err(err) = build_app(&config, &registry) else {
            panic!("second app must not build");
        };
        assert!(matches!(err, MonitorError::AlreadyRegistered { .. }));
    }

    #[test]
    fn test_build_app_disabled_can_repeat() {
        let config = parse_config(
            "[server]\nname = \"demo\"\n[monitor]\nenabled = false\n",
        )
        .unwrap();
        let registry = MetricsRegistry::new();

        build_app(&config, &registry).unwrap();
        assert!(build_app(&config, &registry).is_ok());
    }
}
