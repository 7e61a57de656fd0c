//! A publisher backed by Amazon SNS.

use crate::core::{Notification, Publisher};
use crate::error::PublishError;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;
use tracing::{debug, error, instrument};

/// SNS subjects must be shorter than this many characters.
const MAX_SUBJECT_LEN: usize = 100;
/// SNS rejects message bodies larger than 256 KiB.
const MAX_MESSAGE_BYTES: usize = 256 * 1024;

/// Publishes notifications to SNS topics, using `destination` as the topic ARN.
///
/// The underlying client is built once and reused for every publish.
#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client for `region` from the default credential chain.
    pub async fn from_region(region: &str) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self::new(Client::new(&sdk_config))
    }
}

/// Checks the notification against the limits SNS enforces, so a bad
/// topic prefix or subject prefix fails locally with a clear reason.
pub fn validate(notification: &Notification) -> Result<(), PublishError> {
    if notification.destination.trim().is_empty() {
        return Err(PublishError::InvalidNotification(
            "destination is empty".to_string(),
        ));
    }

    let subject = &notification.subject;
    if subject.is_empty() {
        return Err(PublishError::InvalidNotification("subject is empty".to_string()));
    }
    if subject.chars().count() >= MAX_SUBJECT_LEN {
        return Err(PublishError::InvalidNotification(format!(
            "subject must be shorter than {} characters",
            MAX_SUBJECT_LEN
        )));
    }
    if !subject.is_ascii() || subject.chars().any(|c| c.is_ascii_control()) {
        return Err(PublishError::InvalidNotification(
            "subject must be printable ASCII".to_string(),
        ));
    }
    if subject.starts_with(|c: char| c.is_ascii_whitespace()) {
        return Err(PublishError::InvalidNotification(
            "subject must start with a letter, number or punctuation mark".to_string(),
        ));
    }

    if notification.message.len() > MAX_MESSAGE_BYTES {
        return Err(PublishError::InvalidNotification(format!(
            "message exceeds {} bytes",
            MAX_MESSAGE_BYTES
        )));
    }

    Ok(())
}

#[async_trait]
impl Publisher for SnsPublisher {
    fn name(&self) -> &str {
        "sns"
    }

    #[instrument(skip_all, fields(destination = %notification.destination))]
    async fn publish(&self, notification: &Notification) -> Result<(), PublishError> {
        validate(notification)?;

        let output = self
            .client
            .publish()
            .topic_arn(&notification.destination)
            .message(&notification.message)
            .subject(&notification.subject)
            .send()
            .await
            .map_err(|e| {
                let reason = DisplayErrorContext(&e).to_string();
                error!(error = %reason, "SNS publish failed");
                PublishError::Rejected(reason)
            })?;

        debug!(message_id = ?output.message_id(), "SNS accepted notification");
        Ok(())
    }
}
