//! A mock publisher that records every notification it is given.

use async_trait::async_trait;
use deviation_relay::core::{Notification, Publisher};
use deviation_relay::error::PublishError;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug, Default)]
pub struct MockPublisher {
    pub sent: Arc<Mutex<Vec<Notification>>>,
    pub failing_destinations: Arc<Mutex<HashSet<String>>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every publish to `destination` fail.
    pub fn fail_for(&self, destination: &str) {
        self.failing_destinations
            .lock()
            .unwrap()
            .insert(destination.to_string());
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_destinations(&self) -> Vec<String> {
        self.sent().into_iter().map(|n| n.destination).collect()
    }
}

#[async_trait]
impl Publisher for MockPublisher {
    fn name(&self) -> &str {
        "mock"
    }

    async fn publish(&self, notification: &Notification) -> Result<(), PublishError> {
        if self
            .failing_destinations
            .lock()
            .unwrap()
            .contains(&notification.destination)
        {
            return Err(PublishError::Rejected("AuthorizationError".to_string()));
        }
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}
