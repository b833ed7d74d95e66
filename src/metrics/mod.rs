//! Prometheus metrics for SMS dispatch.
//!
//! - Attempts, deliveries, and failures per provider
//! - Failures by reason
//! - Accumulated provider cost
//! - Send latency, simulated network delay included

mod helpers;

pub use helpers::{encode_metrics, SmsMetrics, SmsStatistics};

use lazy_static::lazy_static;
use prometheus::{
    register_counter, register_histogram, register_int_counter_vec, Counter, Histogram,
    IntCounterVec,
};

/// Prefix for all metrics
const METRIC_PREFIX: &str = "fitaccess_sms";

lazy_static! {
    /// Every send attempt, successful or not
    pub static ref SMS_SENT_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_sent_total", METRIC_PREFIX),
        "Total SMS send attempts",
        &["provider"]
    ).unwrap();

    pub static ref SMS_DELIVERED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_delivered_total", METRIC_PREFIX),
        "Total SMS accepted by the provider",
        &["provider"]
    ).unwrap();

    pub static ref SMS_FAILED_TOTAL: IntCounterVec = register_int_counter_vec!(
        format!("{}_failed_total", METRIC_PREFIX),
        "Total SMS send attempts that failed",
        &["provider", "reason"]
    ).unwrap();

    pub static ref SMS_COST_TOTAL: Counter = register_counter!(
        format!("{}_cost_total", METRIC_PREFIX),
        "Accumulated provider cost of delivered SMS"
    ).unwrap();

    pub static ref SMS_SEND_DURATION: Histogram = register_histogram!(
        format!("{}_send_duration_seconds", METRIC_PREFIX),
        "Time from send request to result",
        vec![0.001, 0.01, 0.1, 0.5, 1.0, 2.0, 3.0, 5.0]
    ).unwrap();
}
