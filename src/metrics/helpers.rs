//! Metrics helper structs for convenient metric recording

use std::time::Duration;

use prometheus::core::Collector;
use prometheus::{Encoder, IntCounterVec, TextEncoder};
use serde::Serialize;

use crate::sms::DeliveryErrorKind;

use super::{
    SMS_COST_TOTAL, SMS_DELIVERED_TOTAL, SMS_FAILED_TOTAL, SMS_SEND_DURATION, SMS_SENT_TOTAL,
};

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer).unwrap_or_default())
}

/// Helper struct for recording SMS metrics
pub struct SmsMetrics;

impl SmsMetrics {
    /// Record a message accepted by `provider`
    pub fn record_delivered(provider: &str, cost: f64) {
        SMS_SENT_TOTAL.with_label_values(&[provider]).inc();
        SMS_DELIVERED_TOTAL.with_label_values(&[provider]).inc();
        if cost > 0.0 {
            SMS_COST_TOTAL.inc_by(cost);
        }
    }

    /// Record a failed send attempt
    pub fn record_failed(provider: &str, kind: DeliveryErrorKind) {
        SMS_SENT_TOTAL.with_label_values(&[provider]).inc();
        SMS_FAILED_TOTAL
            .with_label_values(&[provider, kind.as_str()])
            .inc();
    }

    pub fn observe_duration(elapsed: Duration) {
        SMS_SEND_DURATION.observe(elapsed.as_secs_f64());
    }
}

/// Process-wide send counters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsStatistics {
    pub sent: u64,
    pub delivered: u64,
    pub failed: u64,
    pub total_cost: f64,
}

impl SmsStatistics {
    /// Read the current counter values
    pub fn snapshot() -> Self {
        Self {
            sent: sum_counter(&SMS_SENT_TOTAL),
            delivered: sum_counter(&SMS_DELIVERED_TOTAL),
            failed: sum_counter(&SMS_FAILED_TOTAL),
            total_cost: SMS_COST_TOTAL.get(),
        }
    }
}

/// Sum a counter vector across all label values
fn sum_counter(counter: &IntCounterVec) -> u64 {
    counter
        .collect()
        .iter()
        .flat_map(|family| family.get_metric())
        .map(|metric| metric.get_counter().get_value() as u64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_follow_recorded_outcomes() {
        let before = SmsStatistics::snapshot();

        SmsMetrics::record_delivered("metrics-test", 0.25);
        SmsMetrics::record_failed("metrics-test", DeliveryErrorKind::BackendFailure);

        let after = SmsStatistics::snapshot();
        // Other tests may record concurrently, so only lower bounds hold
        assert!(after.sent >= before.sent + 2);
        assert!(after.delivered > before.delivered);
        assert!(after.failed > before.failed);
        assert!(after.total_cost >= before.total_cost + 0.25 - f64::EPSILON);
    }

    #[test]
    fn test_encode_metrics() {
        SmsMetrics::record_failed("encode-test", DeliveryErrorKind::InvalidDestination);
        SmsMetrics::observe_duration(Duration::from_millis(3));

        let text = encode_metrics().unwrap();
        assert!(text.contains("fitaccess_sms_failed_total"));
        assert!(text.lines().any(|line| {
            line.starts_with("fitaccess_sms_failed_total")
                && line.contains("provider=\"encode-test\"")
                && line.contains("reason=\"invalid_destination\"")
        }));
        assert!(text.contains("fitaccess_sms_send_duration_seconds"));
    }
}
