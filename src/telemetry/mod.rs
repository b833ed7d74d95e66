//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins when set; otherwise `logging.level` from configuration is
//! used as the filter. `logging.json` switches the formatter to JSON lines.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Result type for telemetry operations
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Telemetry-specific error type
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("Invalid log filter '{filter}': {message}")]
    InvalidFilter { filter: String, message: String },
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Build the env filter for the given configuration
pub fn build_filter(config: &LoggingConfig) -> TelemetryResult<EnvFilter> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(directives.as_deref(), config)
}

/// Prefer `directives` when they parse, else the configured level
fn filter_from(directives: Option<&str>, config: &LoggingConfig) -> TelemetryResult<EnvFilter> {
    if let Some(filter) = directives.and_then(|d| EnvFilter::try_new(d).ok()) {
        return Ok(filter);
    }

    EnvFilter::try_new(&config.level).map_err(|e| TelemetryError::InvalidFilter {
        filter: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install the global tracing subscriber
pub fn init_tracing(config: &LoggingConfig) -> TelemetryResult<()> {
    let env_filter = build_filter(config)?;

    let json_layer = config.json.then(|| fmt::layer().json());
    let text_layer = (!config.json).then(|| fmt::layer());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::debug!(json = config.json, level = %config.level, "Tracing initialized");

    Ok(())
}
