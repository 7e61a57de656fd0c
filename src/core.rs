//! Core domain types and service traits for the relay
//!
//! This module defines the data carried from an incoming record to the
//! notification sink, and the trait contract the sink must satisfy.

use crate::error::PublishError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A sensor reading reported as deviating from its expected baseline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviationEvent {
    /// Identifier of the reporting sensor
    #[serde(rename = "id")]
    pub sensor_id: i64,
    /// The measured value
    pub value: f64,
    /// Magnitude of the deviation from the baseline
    pub deviation: f64,
    /// Time of the reading in milliseconds since the Unix epoch
    #[serde(rename = "timestamp")]
    pub timestamp_millis: i64,
}

/// The fully derived arguments of one publish call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Notification {
    /// The channel the message is published to (e.g. an SNS topic ARN)
    pub destination: String,
    /// Subject line attached to the message
    pub subject: String,
    /// Human-readable message body
    pub message: String,
}

// =============================================================================
// Service Traits
// =============================================================================

/// Publishes notifications to an external pub/sub sink
#[async_trait]
pub trait Publisher: Send + Sync {
    /// A short, descriptive name for the sink (e.g., "sns", "logging").
    /// Used for logging.
    fn name(&self) -> &str;

    /// Publishes a single notification.
    ///
    /// # Returns
    /// * `Ok(())` once the sink has accepted the message
    /// * `Err` if the notification was rejected or the call failed
    async fn publish(&self, notification: &Notification) -> Result<(), PublishError>;
}
