//! Configuration Module - TOML-based Server Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! The monitor section carries the same two knobs the library exposes:
//! the metric selection table and the on/off switch.

pub mod loader;

use serde::Deserialize;

use crate::domain::MetricSelection;

/// Top-level configuration.
///
/// Loaded from `config.toml` at startup and validated before the
/// server binds.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Server identity and listener.
  pub server: ServerConfig,
  /// Handler instrumentation.
  #[serde(default)]
  pub monitor: MonitorConfig,
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Human-readable service name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Listener address for the wrapped routes and `/metrics`.
  #[serde(default = "default_bind_address")]
  pub bind_address: String,
}

/// Monitor chain configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
  /// Wrap handlers with instrumentation at all.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Also export process CPU/memory/fd metrics (Linux only).
  #[serde(default = "default_true")]
  pub process_metrics: bool,
  /// Metrics to attach, e.g. `{ all = true }`.
  #[serde(default = "default_selection")]
  pub metrics: MetricSelection,
}

impl Default for MonitorConfig {
  fn default() -> Self {
    Self {
      enabled: default_true(),
      process_metrics: default_true(),
      metrics: default_selection(),
    }
  }
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_true() -> bool {
  true
}

fn default_bind_address() -> String {
  "0.0.0.0:8010".to_string()
}

fn default_selection() -> MetricSelection {
  MetricSelection::all()
}
