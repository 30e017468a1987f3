//! HTTP Monitor Chain — Entry Point
//!
//! Serves an instrumented hello handler next to the Prometheus
//! scrape endpoint. Runs until SIGINT.
//!
//! Wiring sequence:
//! 1. Load config.toml + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Create the metrics registry (+ process collector)
//! 4. Wrap handlers with the monitor chain, install /metrics
//! 5. Spawn the HTTP server
//! 6. Wait for SIGINT → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

use http_monitor_chain::adapters::http::{build_app, HttpServer};
use http_monitor_chain::config;
use http_monitor_chain::MetricsRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from config.toml ──────────────
    let config = config::loader::load_config("config.toml")
        .context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    tracing_subscriber::EnvFilter::new(&config.server.log_level)
                }),
        )
        .json()
        .init();

    info!(
        name = %config.server.name,
        version = env!("CARGO_PKG_VERSION"),
        monitor = config.monitor.enabled,
        "Starting HTTP monitor chain"
    );

    // ── 3. Metrics registry ─────────────────────────────────
    let registry = MetricsRegistry::new();
    if config.monitor.process_metrics {
        registry
            .register_process_collector()
            .context("Failed to register process collector")?;
    }

    // ── 4. Instrumented routes + scrape endpoint ────────────
    // Duplicate metric registration is fatal here.
    let app = build_app(&config, &registry).context("Failed to build monitor chain")?;

    // ── 5. Spawn HTTP server ────────────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);
    let server = HttpServer::new(app, config.server.bind_address.clone());
    let server_shutdown = shutdown_tx.subscribe();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run(server_shutdown).await {
            error!(error = %e, "HTTP server failed");
        }
    });

    // ── 6. Wait for SIGINT ──────────────────────────────────
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("SIGINT received, initiating graceful shutdown");
        }
    }

    let _ = shutdown_tx.send(());
    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), server_handle).await;

    info!("Shutdown complete");
    Ok(())
}
