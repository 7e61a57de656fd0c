//! The relay: turns a batch of raw stream records into per-sensor notifications.

use crate::config::Config;
use crate::core::{Notification, Publisher};
use crate::error::{MalformedRecordError, RecordError};
use crate::formatting::MessageFormatter;
use crate::parsing;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// What to do with the rest of a batch once a record fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log and record the failure, then carry on with the next record.
    #[default]
    Isolate,
    /// Stop at the first failure; remaining records are not attempted.
    Abort,
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Isolate => write!(f, "isolate"),
            FailurePolicy::Abort => write!(f, "abort"),
        }
    }
}

/// A record that was not published, with its position in the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFailure {
    pub index: usize,
    pub error: RecordError,
}

/// The result of processing one batch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchOutcome {
    /// Number of records delivered in the batch
    pub received: usize,
    /// Number of records successfully published
    pub published: usize,
    /// Records that failed, in batch order
    pub failures: Vec<RecordFailure>,
    /// Records never attempted because the batch was aborted
    pub skipped: usize,
}

impl BatchOutcome {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True when every record of the batch was published.
    pub fn is_complete(&self) -> bool {
        self.published == self.received
    }
}

impl fmt::Display for BatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} records published, {} failed, {} skipped",
            self.published,
            self.received,
            self.failed(),
            self.skipped
        )
    }
}

/// Relays deviation records to a per-sensor notification channel.
pub struct Relay {
    topic_base: String,
    subject_base: String,
    region: String,
    failure_policy: FailurePolicy,
    formatter: MessageFormatter,
    publisher: Arc<dyn Publisher>,
}

impl Relay {
    /// Creates a relay from the loaded configuration and a publisher.
    pub fn new(config: &Config, publisher: Arc<dyn Publisher>) -> Self {
        Self {
            topic_base: config.topic_base.clone(),
            subject_base: config.subject_base.clone(),
            region: config.region.clone(),
            failure_policy: config.failure_policy,
            formatter: MessageFormatter::new(config.time_zone),
            publisher,
        }
    }

    pub fn topic_base(&self) -> &str {
        &self.topic_base
    }

    pub fn subject_base(&self) -> &str {
        &self.subject_base
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Builds the notification for one record without publishing it.
    pub fn prepare(&self, record: &[u8]) -> Result<Notification, MalformedRecordError> {
        let event = parsing::parse_record(record)?;
        let message = self.formatter.format(&event)?;

        Ok(Notification {
            destination: format!("{}{}", self.topic_base, event.sensor_id),
            subject: format!("{}{}", self.subject_base, event.sensor_id),
            message,
        })
    }

    /// Decodes, formats and publishes a single record.
    pub async fn process_record(&self, record: &[u8]) -> Result<Notification, RecordError> {
        let notification = self.prepare(record)?;
        self.publisher.publish(&notification).await?;
        Ok(notification)
    }

    /// Processes a batch in delivery order, applying the configured failure policy.
    #[instrument(skip_all, fields(policy = %self.failure_policy, publisher = self.publisher.name()))]
    pub async fn process_batch<I>(&self, records: I) -> BatchOutcome
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let records: Vec<I::Item> = records.into_iter().collect();
        let mut outcome = BatchOutcome {
            received: records.len(),
            ..Default::default()
        };

        for (index, record) in records.iter().enumerate() {
            match self.process_record(record.as_ref()).await {
                Ok(notification) => {
                    info!(destination = %notification.destination, "Published notification");
                    metrics::counter!("relay_records_published_total").increment(1);
                    outcome.published += 1;
                }
                Err(e) => {
                    metrics::counter!("relay_records_failed_total", "kind" => e.kind()).increment(1);
                    match self.failure_policy {
                        FailurePolicy::Isolate => {
                            warn!(index, error = %e, "Skipping record");
                            outcome.failures.push(RecordFailure { index, error: e });
                        }
                        FailurePolicy::Abort => {
                            error!(index, error = %e, "Aborting batch");
                            outcome.failures.push(RecordFailure { index, error: e });
                            outcome.skipped = records.len() - index - 1;
                            metrics::counter!("relay_records_skipped_total")
                                .increment(outcome.skipped as u64);
                            break;
                        }
                    }
                }
            }
        }

        outcome
    }
}
