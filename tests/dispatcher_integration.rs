//! End-to-end dispatch tests
//!
//! These tests drive the public API with zero-latency simulation profiles so
//! they run without real providers or timers.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;

use fitaccess_sms::config::{Settings, SmsConfig};
use fitaccess_sms::sms::{
    DeliveryErrorKind, MemberContact, MembershipStatus, OutboundMessage, ProviderKind,
    ProviderReceipt, ProviderResult, SimulationOverrides, SmsDispatcher, SmsProvider,
};
use fitaccess_sms::state::AppState;
use fitaccess_sms::template::{Template, TemplateStore, Variables};

const PHONE: &str = "+15551234567";

fn instant(provider: ProviderKind, success_rate: f64) -> SmsConfig {
    SmsConfig {
        provider,
        from_number: Some("+1 (555) 000-0000".to_string()),
        simulation: SimulationOverrides {
            min_latency_ms: Some(0),
            latency_spread_ms: Some(0),
            success_rate: Some(success_rate),
            ..Default::default()
        },
        ..Default::default()
    }
}

fn dispatcher(provider: ProviderKind) -> SmsDispatcher {
    SmsDispatcher::from_settings(&instant(provider, 1.0)).unwrap()
}

fn vars(pairs: &[(&str, &str)]) -> Variables {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn welcome_renders_every_value() {
    let dispatcher = dispatcher(ProviderKind::Custom);

    let variables = vars(&[
        ("memberName", "John Smith"),
        ("accessCode", "GYM8124"),
        ("expiryDate", "2024-03-15"),
    ]);
    let result = dispatcher.render_and_send(PHONE, "welcome", variables).await;

    assert!(result.success, "{:?}", result.error);
    assert!(result.message_id.unwrap().starts_with("sim_"));
    assert_eq!(result.cost, Some(0.0));
    assert!(result.error.is_none());
}

/// Keeps every message it is handed
#[derive(Default)]
struct RecordingProvider {
    sent: Mutex<Vec<OutboundMessage>>,
}

#[async_trait]
impl SmsProvider for RecordingProvider {
    async fn send(&self, message: &OutboundMessage) -> ProviderResult<ProviderReceipt> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(ProviderReceipt {
            message_id: "rec_0_000000000".to_string(),
            cost: 0.0,
        })
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

#[tokio::test]
async fn welcome_body_reaches_provider_fully_rendered() {
    let recorder = Arc::new(RecordingProvider::default());
    let dispatcher = SmsDispatcher::new(Arc::new(TemplateStore::with_builtins()), recorder.clone());

    let variables = vars(&[
        ("memberName", "John Smith"),
        ("accessCode", "GYM8124"),
        ("expiryDate", "2024-03-15"),
    ]);
    let result = dispatcher.render_and_send(PHONE, "welcome", variables).await;
    assert!(result.success);

    let sent = recorder.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);

    let message = &sent[0];
    assert_eq!(message.to, PHONE);
    assert_eq!(message.template_id.as_deref(), Some("welcome"));
    assert!(!message.message.contains("{{"));
    assert!(message.message.contains("John Smith"));
    assert!(message.message.contains("GYM8124"));
    assert!(message.message.contains("2024-03-15"));
}

#[tokio::test]
async fn status_change_without_expiry_sends_no_expiry_substitution() {
    let recorder = Arc::new(RecordingProvider::default());
    let dispatcher = SmsDispatcher::new(Arc::new(TemplateStore::with_builtins()), recorder.clone());
    let mike = MemberContact::new("Mike", PHONE, "GYM9362");

    let result = dispatcher
        .send_status_change(&mike, MembershipStatus::Suspended, None)
        .await;
    assert!(result.success);

    let sent = recorder.sent.lock().unwrap();
    let variables = sent[0].variables.as_ref().unwrap();
    assert!(!variables.contains_key("expiryDate"));
    assert!(sent[0].message.contains("suspended"));
    assert!(sent[0].message.contains("GYM9362"));
}

#[tokio::test]
async fn welcome_with_only_name_lists_both_missing() {
    let dispatcher = dispatcher(ProviderKind::Custom);

    let result = dispatcher
        .render_and_send(PHONE, "welcome", vars(&[("memberName", "John Smith")]))
        .await;

    assert!(!result.success);
    assert_eq!(result.error_kind, Some(DeliveryErrorKind::MissingVariables));
    let error = result.error.unwrap();
    assert!(error.contains("accessCode"));
    assert!(error.contains("expiryDate"));
    assert!(error.find("accessCode") < error.find("expiryDate"));
}

#[tokio::test]
async fn unknown_template_is_reported() {
    let dispatcher = dispatcher(ProviderKind::Twilio);

    let result = dispatcher
        .render_and_send(PHONE, "birthday", Variables::new())
        .await;

    assert!(!result.success);
    assert_eq!(result.error_kind, Some(DeliveryErrorKind::TemplateNotFound));
    assert!(result.message_id.is_none());
}

#[tokio::test]
async fn invalid_destinations_rejected_for_every_provider() {
    let providers = [
        ProviderKind::Twilio,
        ProviderKind::AwsSns,
        ProviderKind::Firebase,
        ProviderKind::Custom,
    ];
    let destinations = ["555-1234", "12 34 56 78 9", "+1555abc4567", "", "call me maybe"];

    for provider in providers {
        let dispatcher = dispatcher(provider);
        for destination in destinations {
            let result = dispatcher
                .send(OutboundMessage::new(destination, "hello"))
                .await;

            assert!(!result.success);
            assert_eq!(
                result.error_kind,
                Some(DeliveryErrorKind::InvalidDestination),
                "{} via {}",
                destination,
                provider
            );
            assert_eq!(result.error.as_deref(), Some("Invalid phone number format"));
        }
    }
}

#[tokio::test]
async fn backend_failure_uses_provider_text() {
    let cases = [
        (ProviderKind::Twilio, "Twilio API error: Message delivery failed"),
        (ProviderKind::AwsSns, "AWS SNS error: Rate limit exceeded"),
        (ProviderKind::Firebase, "Firebase error: Invalid registration token"),
    ];

    for (provider, text) in cases {
        let dispatcher = SmsDispatcher::from_settings(&instant(provider, 0.0)).unwrap();
        let result = dispatcher
            .send(OutboundMessage::new(PHONE, "hello"))
            .await;

        assert!(!result.success);
        assert_eq!(result.error_kind, Some(DeliveryErrorKind::BackendFailure));
        assert_eq!(result.error.as_deref(), Some(text));
        assert!(result.cost.is_none());
    }
}

#[tokio::test]
async fn configured_cost_is_reported() {
    let mut settings = instant(ProviderKind::Twilio, 1.0);
    settings.simulation.unit_cost = Some(0.07);
    let dispatcher = SmsDispatcher::from_settings(&settings).unwrap();

    let result = dispatcher
        .send(OutboundMessage::new(PHONE, "hello"))
        .await;

    assert!(result.success);
    assert_eq!(result.cost, Some(0.07));
    assert!(result.message_id.unwrap().starts_with("twilio_"));
}

#[tokio::test]
async fn status_change_suspended_without_expiry() {
    let dispatcher = dispatcher(ProviderKind::Custom);
    let mike = MemberContact::new("Mike", PHONE, "GYM9362");

    let result = dispatcher
        .send_status_change(&mike, MembershipStatus::Suspended, None)
        .await;

    assert!(result.success, "{:?}", result.error);
}

#[tokio::test]
async fn status_change_reactivated_requires_expiry() {
    let dispatcher = dispatcher(ProviderKind::Custom);
    let mike = MemberContact::new("Mike", PHONE, "GYM9362");

    let without = dispatcher
        .send_status_change(&mike, MembershipStatus::Reactivated, None)
        .await;
    assert!(!without.success);
    assert_eq!(
        without.error.as_deref(),
        Some("Missing required variables: expiryDate")
    );

    let expiry = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
    let with = dispatcher
        .send_status_change(&mike, MembershipStatus::Reactivated, Some(expiry))
        .await;
    assert!(with.success);
}

#[tokio::test]
async fn convenience_wrappers_succeed() {
    let dispatcher = dispatcher(ProviderKind::AwsSns);
    let member = MemberContact::new("Sarah Johnson", "+1 (555) 987-6543", "GYM2231");
    let expiry = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();

    assert!(dispatcher.send_welcome(&member, expiry).await.success);
    assert!(dispatcher.send_renewal_reminder(&member, expiry).await.success);
    assert!(dispatcher.send_access_code_reset(&member).await.success);
}

#[tokio::test]
async fn wrapper_rejects_bad_member_phone() {
    let dispatcher = dispatcher(ProviderKind::Custom);
    let member = MemberContact::new("Tom", "n/a", "GYM0001");

    let result = dispatcher.send_access_code_reset(&member).await;
    assert_eq!(result.error_kind, Some(DeliveryErrorKind::InvalidDestination));
}

#[tokio::test]
async fn list_templates_is_a_defensive_copy() {
    let dispatcher = dispatcher(ProviderKind::Custom);

    let mut first = dispatcher.list_templates();
    first[0].body = "tampered".to_string();
    first.pop();

    let second = dispatcher.list_templates();
    assert_eq!(second.len(), 5);
    assert_ne!(second[0].body, "tampered");
    assert_eq!(second, dispatcher.list_templates());
}

#[tokio::test]
async fn configured_template_is_usable() {
    let mut settings = instant(ProviderKind::Custom, 1.0);
    settings.templates = vec![Template::new(
        "class_cancelled",
        "Class Cancelled",
        "Class Cancelled",
        "Hi {{memberName}}, {{className}} is cancelled. {{signature}}",
        &["memberName", "className"],
    )];
    let dispatcher = SmsDispatcher::from_settings(&settings).unwrap();

    assert_eq!(dispatcher.list_templates().len(), 6);

    let result = dispatcher
        .render_and_send(
            PHONE,
            "class_cancelled",
            vars(&[("memberName", "Ana"), ("className", "Spin")]),
        )
        .await;
    assert!(result.success);
}

#[tokio::test]
async fn concurrent_sends_are_independent() {
    let dispatcher = Arc::new(dispatcher(ProviderKind::Firebase));

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                let code = format!("GYM{:04}", i);
                let member = MemberContact::new(format!("Member {}", i), PHONE, code);
                dispatcher.send_access_code_reset(&member).await
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        let result = handle.await.unwrap();
        assert!(result.success);
        ids.insert(result.message_id.unwrap());
    }
    assert_eq!(ids.len(), 16);
}

#[tokio::test]
async fn statistics_count_outcomes() {
    let dispatcher = dispatcher(ProviderKind::Custom);
    let before = dispatcher.statistics();

    dispatcher
        .send(OutboundMessage::new(PHONE, "counted"))
        .await;
    dispatcher
        .send(OutboundMessage::new("bad", "counted"))
        .await;

    let after = dispatcher.statistics();
    assert!(after.sent >= before.sent + 2);
    assert!(after.delivered > before.delivered);
    assert!(after.failed > before.failed);
}

#[test]
fn app_state_builds_from_default_settings() {
    let state = AppState::new(Settings::default()).unwrap();
    assert_eq!(state.dispatcher.provider_name(), "custom");
}
