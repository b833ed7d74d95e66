//! AWS SNS stand-in

use async_trait::async_trait;

use crate::sms::types::OutboundMessage;

use super::{ProviderCredentials, ProviderReceipt, ProviderResult, SimulationProfile, SmsProvider};

/// Simulated AWS SNS direct-publish backend
pub struct AwsSnsProvider {
    credentials: ProviderCredentials,
    profile: SimulationProfile,
}

impl AwsSnsProvider {
    pub fn new(credentials: ProviderCredentials, profile: SimulationProfile) -> Self {
        Self {
            credentials,
            profile,
        }
    }
}

#[async_trait]
impl SmsProvider for AwsSnsProvider {
    async fn send(&self, message: &OutboundMessage) -> ProviderResult<ProviderReceipt> {
        tracing::info!(
            provider = self.name(),
            to = %message.to,
            sender_id = ?self.credentials.from_number,
            template_id = ?message.template_id,
            "Publishing via AWS SNS"
        );

        self.profile.simulate().await
    }

    fn name(&self) -> &'static str {
        "aws-sns"
    }
}
