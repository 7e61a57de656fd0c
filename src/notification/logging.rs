//! A publisher that logs notifications instead of sending them.
//!
//! Used for dry runs and local replays, where nothing should leave the host.

use crate::core::{Notification, Publisher};
use crate::error::PublishError;
use async_trait::async_trait;
use tracing::info;

#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingPublisher;

#[async_trait]
impl Publisher for LoggingPublisher {
    fn name(&self) -> &str {
        "logging"
    }

    async fn publish(&self, notification: &Notification) -> Result<(), PublishError> {
        info!(
            destination = %notification.destination,
            subject = %notification.subject,
            message = %notification.message,
            "Dry run, notification not sent"
        );
        Ok(())
    }
}
