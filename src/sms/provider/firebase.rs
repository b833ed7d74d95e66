//! Firebase Cloud Messaging stand-in

use async_trait::async_trait;

use crate::sms::types::OutboundMessage;

use super::{ProviderCredentials, ProviderReceipt, ProviderResult, SimulationProfile, SmsProvider};

pub struct FirebaseProvider {
    credentials: ProviderCredentials,
    profile: SimulationProfile,
}

impl FirebaseProvider {
    pub fn new(credentials: ProviderCredentials, profile: SimulationProfile) -> Self {
        Self {
            credentials,
            profile,
        }
    }
}

#[async_trait]
impl SmsProvider for FirebaseProvider {
    async fn send(&self, message: &OutboundMessage) -> ProviderResult<ProviderReceipt> {
        tracing::info!(
            provider = self.name(),
            to = %message.to,
            has_server_key = self.credentials.api_key.is_some(),
            template_id = ?message.template_id,
            "Sending via Firebase"
        );

        self.profile.simulate().await
    }

    fn name(&self) -> &'static str {
        "firebase"
    }
}
