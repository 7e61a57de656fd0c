//! Shared test doubles for integration tests.

#![allow(dead_code)]

pub mod mock_publisher;
pub mod test_metrics;

use deviation_relay::config::Config;
use deviation_relay::formatting::TimeZoneSetting;
use deviation_relay::relay::FailurePolicy;

pub const TOPIC_BASE: &str = "arn:aws:sns:us-east-1:123456789012:sensor-";
pub const SUBJECT_BASE: &str = "Deviation on sensor ";

/// A configuration with deterministic (UTC) timestamp rendering.
pub fn test_config(failure_policy: FailurePolicy) -> Config {
    Config {
        topic_base: TOPIC_BASE.to_string(),
        subject_base: SUBJECT_BASE.to_string(),
        failure_policy,
        time_zone: TimeZoneSetting::Utc,
        ..Default::default()
    }
}

/// A well-formed record for `sensor_id`, with some noise before the payload.
pub fn deviation_record(sensor_id: i64) -> Vec<u8> {
    format!(
        r#"probe-{}{{"id":{},"deviation":3.5,"value":97.2,"timestamp":1690000000000}}"#,
        sensor_id, sensor_id
    )
    .into_bytes()
}
