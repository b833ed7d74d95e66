//! Twilio stand-in

use async_trait::async_trait;

use crate::sms::types::OutboundMessage;

use super::{ProviderCredentials, ProviderReceipt, ProviderResult, SimulationProfile, SmsProvider};

/// Simulated Twilio Programmable Messaging backend
pub struct TwilioProvider {
    credentials: ProviderCredentials,
    profile: SimulationProfile,
}

impl TwilioProvider {
    pub fn new(credentials: ProviderCredentials, profile: SimulationProfile) -> Self {
        Self {
            credentials,
            profile,
        }
    }
}

#[async_trait]
impl SmsProvider for TwilioProvider {
    async fn send(&self, message: &OutboundMessage) -> ProviderResult<ProviderReceipt> {
        tracing::info!(
            provider = self.name(),
            to = %message.to,
            from = ?self.credentials.from_number,
            has_api_key = self.credentials.api_key.is_some(),
            template_id = ?message.template_id,
            "Sending via Twilio"
        );

        self.profile.simulate().await
    }

    fn name(&self) -> &'static str {
        "twilio"
    }
}
