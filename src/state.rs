use std::path::Path;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::Result;
use crate::sms::{ProviderKind, SmsDispatcher};
use crate::telemetry::init_tracing;

/// Everything built once at startup and shared read-only afterwards
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub dispatcher: Arc<SmsDispatcher>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let dispatcher = Arc::new(SmsDispatcher::from_settings(&settings.sms)?);

        Ok(Self {
            settings: Arc::new(settings),
            dispatcher,
        })
    }

    /// Load configuration, install tracing, then build the state.
    ///
    /// `provider` overrides the configured provider before validation.
    pub fn bootstrap(config_path: Option<&Path>, provider: Option<ProviderKind>) -> Result<Self> {
        let mut settings = Settings::load(config_path)?;
        if let Some(provider) = provider {
            settings.sms.provider = provider;
            settings.validate()?;
        }

        init_tracing(&settings.logging)?;
        tracing::info!(provider = %settings.sms.provider, "Configuration loaded");

        Self::new(settings)
    }
}
