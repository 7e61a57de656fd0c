//! Error types for record processing.
//!
//! A record can fail in two places: while it is being decoded into a
//! `DeviationEvent`, or while the resulting notification is handed to the
//! publisher. Both are captured per record in a `RecordError`.

use thiserror::Error;

/// The record did not carry a usable deviation payload.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MalformedRecordError {
    #[error("no JSON payload found in record")]
    MissingPayload,

    #[error("invalid deviation payload: {0}")]
    InvalidPayload(String),

    #[error("timestamp {0} is outside the representable date range")]
    TimestampOutOfRange(i64),
}

/// The notification could not be published.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PublishError {
    /// Rejected locally, before any call to the sink was made.
    #[error("invalid notification: {0}")]
    InvalidNotification(String),

    /// The sink (or the transport to it) reported a failure.
    #[error("publish failed: {0}")]
    Rejected(String),
}

/// Why a single record of a batch was not published.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error(transparent)]
    Malformed(#[from] MalformedRecordError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl RecordError {
    /// Short label used for logging and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RecordError::Malformed(_) => "malformed",
            RecordError::Publish(_) => "publish",
        }
    }
}
