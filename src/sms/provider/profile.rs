//! Shared simulation engine behind every built-in provider

use std::time::Duration;

use chrono::Utc;
use rand::Rng;
use serde::Deserialize;

use super::{ProviderError, ProviderReceipt, ProviderResult};

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 9;

/// Latency, reliability, and pricing of a simulated provider
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationProfile {
    /// Minimum simulated network latency
    pub min_latency_ms: u64,
    /// Random latency added on top of the minimum (inclusive upper bound)
    pub latency_spread_ms: u64,
    /// Probability in [0, 1] that a send succeeds
    pub success_rate: f64,
    /// Prefix of generated message IDs
    pub id_prefix: String,
    /// Cost reported per delivered message
    pub unit_cost: f64,
    /// Error description for a simulated failure
    pub failure_message: String,
}

/// Partial profile from configuration; unset fields keep the provider default
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationOverrides {
    pub min_latency_ms: Option<u64>,
    pub latency_spread_ms: Option<u64>,
    pub success_rate: Option<f64>,
    pub id_prefix: Option<String>,
    pub unit_cost: Option<f64>,
    pub failure_message: Option<String>,
}

impl SimulationProfile {
    /// Apply configured overrides on top of this profile
    pub fn with_overrides(mut self, overrides: &SimulationOverrides) -> Self {
        if let Some(ms) = overrides.min_latency_ms {
            self.min_latency_ms = ms;
        }
        if let Some(ms) = overrides.latency_spread_ms {
            self.latency_spread_ms = ms;
        }
        if let Some(rate) = overrides.success_rate {
            self.success_rate = rate;
        }
        if let Some(prefix) = &overrides.id_prefix {
            self.id_prefix = prefix.clone();
        }
        if let Some(cost) = overrides.unit_cost {
            self.unit_cost = cost;
        }
        if let Some(message) = &overrides.failure_message {
            self.failure_message = message.clone();
        }
        self
    }

    /// Same profile with no latency
    pub fn instant(mut self) -> Self {
        self.min_latency_ms = 0;
        self.latency_spread_ms = 0;
        self
    }

    fn pick_latency(&self) -> Duration {
        let spread = if self.latency_spread_ms == 0 {
            0
        } else {
            rand::rng().random_range(0..=self.latency_spread_ms)
        };
        Duration::from_millis(self.min_latency_ms.saturating_add(spread))
    }

    fn roll_success(&self) -> bool {
        rand::rng().random::<f64>() < self.success_rate
    }

    /// Wait out the simulated latency, then succeed or fail per the profile
    pub async fn simulate(&self) -> ProviderResult<ProviderReceipt> {
        let latency = self.pick_latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        if self.roll_success() {
            Ok(ProviderReceipt {
                message_id: generate_message_id(&self.id_prefix),
                cost: self.unit_cost,
            })
        } else {
            Err(ProviderError::Rejected(self.failure_message.clone()))
        }
    }
}

/// `<prefix>_<unix millis>_<9 lowercase base36 chars>`
pub fn generate_message_id(prefix: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect();

    format!("{}_{}_{}", prefix, Utc::now().timestamp_millis(), suffix)
}
