use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures::FutureExt;

use crate::config::SmsConfig;
use crate::metrics::{SmsMetrics, SmsStatistics};
use crate::template::{create_template_store, Template, TemplateResult, TemplateStore, Variables};

use super::destination::is_valid_phone_number;
use super::provider::{create_provider, ProviderError, ProviderReceipt, SmsProvider};
use super::types::{DeliveryError, DeliveryResult, OutboundMessage};

/// Renders templates and hands messages to the configured provider.
///
/// Holds only read-only state: the template table and the provider chosen at
/// construction. Every public send returns a [`DeliveryResult`]; no expected
/// failure escapes as an error or a panic.
pub struct SmsDispatcher {
    templates: Arc<TemplateStore>,
    provider: Arc<dyn SmsProvider>,
}

impl SmsDispatcher {
    /// Create a dispatcher over an existing store and provider
    pub fn new(templates: Arc<TemplateStore>, provider: Arc<dyn SmsProvider>) -> Self {
        Self {
            templates,
            provider,
        }
    }

    /// Build the template store and provider from configuration
    pub fn from_settings(settings: &SmsConfig) -> TemplateResult<Self> {
        let templates = create_template_store(settings.templates.clone())?;
        let provider = create_provider(settings);

        tracing::info!(
            provider = provider.name(),
            templates = templates.count(),
            "SMS dispatcher initialized"
        );

        Ok(Self::new(templates, provider))
    }

    /// Name of the provider every send goes through
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Copy of every registered template
    pub fn list_templates(&self) -> Vec<Template> {
        self.templates.list()
    }

    /// Process-wide send counters
    pub fn statistics(&self) -> SmsStatistics {
        SmsStatistics::snapshot()
    }

    /// Render `template_id` with `variables` and send the result to `destination`
    #[tracing::instrument(
        name = "sms.render_and_send",
        skip(self, variables),
        fields(provider = self.provider.name())
    )]
    pub async fn render_and_send(
        &self,
        destination: &str,
        template_id: &str,
        variables: Variables,
    ) -> DeliveryResult {
        let started = Instant::now();

        let outcome = match self.render(destination, template_id, variables) {
            Ok(message) => self.deliver(&message).await,
            Err(err) => Err(err),
        };

        self.complete(outcome, started)
    }

    /// Validate the destination and send a message through the provider
    #[tracing::instrument(
        name = "sms.send",
        skip(self, message),
        fields(provider = self.provider.name(), template_id = ?message.template_id)
    )]
    pub async fn send(&self, message: OutboundMessage) -> DeliveryResult {
        let started = Instant::now();
        let outcome = self.deliver(&message).await;
        self.complete(outcome, started)
    }

    fn render(
        &self,
        destination: &str,
        template_id: &str,
        variables: Variables,
    ) -> Result<OutboundMessage, DeliveryError> {
        let rendered = self.templates.render(template_id, &variables)?;

        Ok(OutboundMessage::new(destination, rendered.body)
            .with_template(rendered.template_id, variables))
    }

    async fn deliver(&self, message: &OutboundMessage) -> Result<ProviderReceipt, DeliveryError> {
        if !is_valid_phone_number(&message.to) {
            return Err(DeliveryError::InvalidDestination);
        }

        let attempt = AssertUnwindSafe(self.provider.send(message))
            .catch_unwind()
            .await;

        match attempt {
            Ok(Ok(receipt)) => Ok(receipt),
            Ok(Err(ProviderError::Rejected(reason))) => Err(DeliveryError::BackendFailure {
                provider: self.provider.name(),
                message: reason,
            }),
            Ok(Err(err @ ProviderError::Internal { .. })) => {
                Err(DeliveryError::Unexpected(err.to_string()))
            }
            Err(panic) => Err(DeliveryError::Unexpected(panic_message(panic.as_ref()))),
        }
    }

    fn complete(
        &self,
        outcome: Result<ProviderReceipt, DeliveryError>,
        started: Instant,
    ) -> DeliveryResult {
        let provider = self.provider.name();
        SmsMetrics::observe_duration(started.elapsed());

        match outcome {
            Ok(receipt) => {
                SmsMetrics::record_delivered(provider, receipt.cost);
                tracing::info!(
                    provider,
                    message_id = %receipt.message_id,
                    cost = receipt.cost,
                    "SMS delivered"
                );
                DeliveryResult::delivered(receipt)
            }
            Err(err) => {
                let kind = err.kind();
                SmsMetrics::record_failed(provider, kind);
                match &err {
                    DeliveryError::Unexpected(_) => {
                        tracing::error!(provider, error = %err, "SMS send failed unexpectedly")
                    }
                    _ => tracing::warn!(
                        provider,
                        kind = kind.as_str(),
                        error = %err,
                        "SMS not delivered"
                    ),
                }
                DeliveryResult::failed(&err)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "Unknown error occurred".to_string()
    }
}
