//! SMS delivery providers.
//!
//! # Provider Architecture
//!
//! Every backend implements [`SmsProvider`], a single capability: accept one
//! message and return a receipt or a failure. The dispatcher only ever sees
//! `Arc<dyn SmsProvider>`, chosen once by [`create_provider`].
//!
//! - `TwilioProvider`, `AwsSnsProvider`, `FirebaseProvider`: stand-ins for the
//!   real integrations, driven by a [`SimulationProfile`]
//! - `SimulationProvider`: development mode, logs the message and succeeds
//!
//! None of the current backends perform network I/O.

mod aws_sns;
mod factory;
mod firebase;
mod profile;
mod simulation;
mod twilio;

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::OutboundMessage;

pub use aws_sns::AwsSnsProvider;
pub use factory::create_provider;
pub use firebase::FirebaseProvider;
pub use profile::{generate_message_id, SimulationOverrides, SimulationProfile};
pub use simulation::SimulationProvider;
pub use twilio::TwilioProvider;

/// Provider-specific error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider accepted the request but did not deliver the message
    #[error("{0}")]
    Rejected(String),

    /// Anything else that went wrong inside the provider
    #[error("{provider} internal error: {message}")]
    Internal {
        provider: &'static str,
        message: String,
    },
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// What a provider hands back for a delivered message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderReceipt {
    /// Opaque provider-assigned message ID
    pub message_id: String,
    /// Unit cost of the message
    pub cost: f64,
}

/// Trait for SMS delivery backends.
///
/// Uses `async_trait` so providers can be held as `Arc<dyn SmsProvider>`.
/// A real integration replaces a simulated one by implementing this trait;
/// the dispatcher does not change.
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Attempt delivery of one message. Called at most once per send.
    async fn send(&self, message: &OutboundMessage) -> ProviderResult<ProviderReceipt>;

    /// Provider name for logging and metrics
    fn name(&self) -> &'static str;
}

/// Closed set of configurable providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "twilio")]
    Twilio,
    #[serde(rename = "aws-sns")]
    AwsSns,
    #[serde(rename = "firebase")]
    Firebase,
    #[default]
    #[serde(rename = "custom", alias = "custom-simulation")]
    Custom,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Twilio => "twilio",
            ProviderKind::AwsSns => "aws-sns",
            ProviderKind::Firebase => "firebase",
            ProviderKind::Custom => "custom",
        }
    }

    /// Default simulation parameters for this provider
    pub fn default_profile(&self) -> SimulationProfile {
        match self {
            ProviderKind::Twilio => SimulationProfile {
                min_latency_ms: 1000,
                latency_spread_ms: 2000,
                success_rate: 0.95,
                id_prefix: "twilio".to_string(),
                unit_cost: 0.02,
                failure_message: "Twilio API error: Message delivery failed".to_string(),
            },
            ProviderKind::AwsSns => SimulationProfile {
                min_latency_ms: 800,
                latency_spread_ms: 1500,
                success_rate: 0.97,
                id_prefix: "sns".to_string(),
                unit_cost: 0.015,
                failure_message: "AWS SNS error: Rate limit exceeded".to_string(),
            },
            ProviderKind::Firebase => SimulationProfile {
                min_latency_ms: 1200,
                latency_spread_ms: 1800,
                success_rate: 0.93,
                id_prefix: "fcm".to_string(),
                unit_cost: 0.01,
                failure_message: "Firebase error: Invalid registration token".to_string(),
            },
            ProviderKind::Custom => SimulationProfile {
                min_latency_ms: 500,
                latency_spread_ms: 1000,
                success_rate: 1.0,
                id_prefix: "sim".to_string(),
                unit_cost: 0.0,
                failure_message: "Simulated delivery failure".to_string(),
            },
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twilio" => Ok(ProviderKind::Twilio),
            "aws-sns" => Ok(ProviderKind::AwsSns),
            "firebase" => Ok(ProviderKind::Firebase),
            "custom" | "custom-simulation" => Ok(ProviderKind::Custom),
            other => Err(format!(
                "unknown SMS provider '{}' (expected twilio, aws-sns, firebase, or custom)",
                other
            )),
        }
    }
}

/// Credentials and sender address, accepted as given
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProviderCredentials {
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub from_number: Option<String>,
}
