//! Development / demo provider

use async_trait::async_trait;

use crate::sms::types::OutboundMessage;

use super::{ProviderReceipt, ProviderResult, SimulationProfile, SmsProvider};

/// Logs every message in full and reports it as delivered (per its profile)
pub struct SimulationProvider {
    profile: SimulationProfile,
}

impl SimulationProvider {
    pub fn new(profile: SimulationProfile) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl SmsProvider for SimulationProvider {
    async fn send(&self, message: &OutboundMessage) -> ProviderResult<ProviderReceipt> {
        tracing::info!(
            provider = self.name(),
            to = %message.to,
            message = %message.message,
            template_id = ?message.template_id,
            variables = ?message.variables,
            "SMS simulation mode"
        );

        self.profile.simulate().await
    }

    fn name(&self) -> &'static str {
        "custom"
    }
}
