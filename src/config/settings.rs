use std::env;
use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::sms::{ProviderCredentials, ProviderKind, SimulationOverrides, SimulationProfile};
use crate::template::Template;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub sms: SmsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Provider selection, credentials, and extra templates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SmsConfig {
    /// Delivery backend (twilio, aws-sns, firebase, custom)
    #[serde(default)]
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    /// Sender number or sender ID
    pub from_number: Option<String>,
    /// Overrides for the provider's simulated latency, success rate, and cost
    #[serde(default)]
    pub simulation: SimulationOverrides,
    /// Templates registered after the built-in ones
    #[serde(default)]
    pub templates: Vec<Template>,
}

impl SmsConfig {
    pub fn credentials(&self) -> ProviderCredentials {
        ProviderCredentials {
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            from_number: self.from_number.clone(),
        }
    }

    /// Provider default profile with configured overrides applied
    pub fn profile(&self) -> SimulationProfile {
        self.provider.default_profile().with_overrides(&self.simulation)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_from_number() -> &'static str {
    "+1 (555) 000-0000"
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Load settings, layering `extra_file` above the config directory files
    pub fn load(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Self::defaults()?
            // Load config files if they exist
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(Self::environment());

        Self::build(builder)
    }

    /// Environment layer:
    /// FITACCESS_SMS__PROVIDER, FITACCESS_SMS__FROM_NUMBER, FITACCESS_LOGGING__JSON, etc.
    fn environment() -> Environment {
        Environment::with_prefix("FITACCESS")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("sms.provider", ProviderKind::Custom.as_str())?
            .set_default("sms.from_number", default_from_number())?
            .set_default("logging.level", default_log_level())?
            .set_default("logging.json", false)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject simulation parameters that cannot describe a provider
    pub fn validate(&self) -> Result<(), ConfigError> {
        let profile = self.sms.profile();

        if !(0.0..=1.0).contains(&profile.success_rate) {
            return Err(ConfigError::Message(format!(
                "sms.simulation.success_rate must be between 0 and 1, got {}",
                profile.success_rate
            )));
        }

        if !profile.unit_cost.is_finite() || profile.unit_cost < 0.0 {
            return Err(ConfigError::Message(format!(
                "sms.simulation.unit_cost must be a non-negative number, got {}",
                profile.unit_cost
            )));
        }

        if profile.id_prefix.is_empty() {
            return Err(ConfigError::Message(
                "sms.simulation.id_prefix must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
