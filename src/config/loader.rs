//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use super::AppConfig;
use crate::domain::MetricName;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails (including unknown metric names)
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    name = %config.server.name,
    bind_address = %config.server.bind_address,
    monitor = config.monitor.enabled,
    metrics = ?config
      .monitor
      .metrics
      .enabled()
      .map(MetricName::as_str)
      .collect::<Vec<_>>(),
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
///
/// # Errors
/// Fails on malformed TOML or invalid values.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;

  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.server.name.is_empty(),
    "Server name must not be empty"
  );

  config
    .server
    .bind_address
    .parse::<SocketAddr>()
    .with_context(|| {
      format!("Invalid bind_address: {}", config.server.bind_address)
    })?;

  anyhow::ensure!(
    ["trace", "debug", "info", "warn", "error"]
      .contains(&config.server.log_level.to_lowercase().as_str()),
    "log_level must be one of trace/debug/info/warn/error, got {}",
    config.server.log_level
  );

  if config.monitor.enabled && config.monitor.metrics.is_empty() {
    warn!("Monitoring enabled but no metrics selected");
  }

  Ok(())
}
