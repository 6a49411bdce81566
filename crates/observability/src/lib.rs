//! # Observability
//!
//! Tracing and metrics wiring for hosts embedding the delivery layer.
//!
//! ## Functionality
//!
//! - Tracing initialization (JSON / Pretty / Compact formats)
//! - Optional Prometheus metrics exporter
//! - Mirroring of per-sink delivery counters into the `metrics` facade
//!
//! ## Usage
//!
//! ```ignore
//! observability::init()?;
//!
//! // later, from a stats tick:
//! observability::report_sink_counters(&registry);
//! ```

pub mod reporter;

use anyhow::{Context, Result};
use metrics_exporter_prometheus::PrometheusBuilder;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use reporter::report_sink_counters;

/// Initialize observability with defaults (compact logs, no exporter).
pub fn init() -> Result<()> {
    init_with_config(ObservabilityConfig::default())
}

/// Observability configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Log output format
    pub log_format: LogFormat,
    /// Prometheus listener port (None = disabled)
    pub metrics_port: Option<u16>,
    /// Log level used when RUST_LOG is unset
    pub default_log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Compact,
            metrics_port: None,
            default_log_level: "info".to_string(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default)]
pub enum LogFormat {
    /// JSON structured logs
    Json,
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
}

/// Initialize with a custom configuration.
pub fn init_with_config(config: ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_log_level));
    let base = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => base
            .with(fmt::layer().json().with_target(true))
            .try_init(),
        LogFormat::Pretty => base.with(fmt::layer().pretty()).try_init(),
        LogFormat::Compact => base.with(fmt::layer().compact()).try_init(),
    }
    .context("failed to initialize tracing subscriber")?;

    if let Some(port) = config.metrics_port {
        PrometheusBuilder::new()
            .with_http_listener(([0, 0, 0, 0], port))
            .install()
            .context("failed to install Prometheus recorder")?;

        tracing::info!(port = port, "Prometheus metrics endpoint initialized");
    }

    tracing::info!(
        log_format = ?config.log_format,
        metrics_port = ?config.metrics_port,
        "observability initialized"
    );

    Ok(())
}
