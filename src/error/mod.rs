//! Startup and wiring errors.
//!
//! Delivery failures never use this type; they are reported through
//! [`crate::sms::DeliveryResult`].

use thiserror::Error;

use crate::telemetry::TelemetryError;
use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

pub type Result<T> = std::result::Result<T, AppError>;
