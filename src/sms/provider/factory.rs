//! Provider factory

use std::sync::Arc;

use crate::config::SmsConfig;

use super::{
    AwsSnsProvider, FirebaseProvider, ProviderKind, SimulationProvider, SmsProvider,
    TwilioProvider,
};

/// Create the SMS provider selected by configuration.
///
/// Returns the backend matching `settings.provider`:
/// - `twilio`: `TwilioProvider`
/// - `aws-sns`: `AwsSnsProvider`
/// - `firebase`: `FirebaseProvider`
/// - `custom` (default): `SimulationProvider`
///
/// The provider's default simulation profile is merged with
/// `settings.simulation` before construction.
///
/// # Example
///
/// ```rust,ignore
/// let provider = create_provider(&settings.sms);
/// let dispatcher = SmsDispatcher::new(templates, provider);
/// ```
pub fn create_provider(settings: &SmsConfig) -> Arc<dyn SmsProvider> {
    let profile = settings.profile();

    tracing::info!(
        provider = %settings.provider,
        success_rate = profile.success_rate,
        unit_cost = profile.unit_cost,
        min_latency_ms = profile.min_latency_ms,
        "Creating SMS provider"
    );

    match settings.provider {
        ProviderKind::Twilio => Arc::new(TwilioProvider::new(settings.credentials(), profile)),
        ProviderKind::AwsSns => Arc::new(AwsSnsProvider::new(settings.credentials(), profile)),
        ProviderKind::Firebase => {
            Arc::new(FirebaseProvider::new(settings.credentials(), profile))
        }
        ProviderKind::Custom => Arc::new(SimulationProvider::new(profile)),
    }
}
