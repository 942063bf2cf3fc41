//! # Result Publisher
//!
//! The orchestrator's only outbound side effect: one message per batch, either
//! a `FoodCalculation` on the result queue or a `CalculationError` on the
//! dead-letter queue.

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use super::errors::{MessagingError, MessagingResult};
use super::message::{MessageId, QueueMessage};
use super::provider::MessagingProvider;
use crate::config::MessagingConfig;
use crate::models::{CalculationError, FoodCalculation};

#[derive(Debug, Clone)]
pub struct ResultPublisher {
    provider: Arc<MessagingProvider>,
    result_queue: String,
    dead_letter_queue: String,
    timeout: Duration,
}

impl ResultPublisher {
    pub fn new(
        provider: Arc<MessagingProvider>,
        result_queue: impl Into<String>,
        dead_letter_queue: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            result_queue: result_queue.into(),
            dead_letter_queue: dead_letter_queue.into(),
            timeout,
        }
    }

    pub fn from_config(provider: Arc<MessagingProvider>, config: &MessagingConfig) -> Self {
        Self::new(
            provider,
            config.result_queue.clone(),
            config.dead_letter_queue.clone(),
            config.timeout(),
        )
    }

    pub fn result_queue(&self) -> &str {
        &self.result_queue
    }

    pub fn dead_letter_queue(&self) -> &str {
        &self.dead_letter_queue
    }

    pub fn provider(&self) -> &Arc<MessagingProvider> {
        &self.provider
    }

    /// Create both queues; called once at startup
    pub async fn ensure_queues(&self) -> MessagingResult<()> {
        self.provider
            .ensure_queues(&[&self.result_queue, &self.dead_letter_queue])
            .await
    }

    pub async fn publish_result(&self, calculation: &FoodCalculation) -> MessagingResult<MessageId> {
        self.send(&self.result_queue, calculation).await
    }

    pub async fn publish_failure(&self, failure: &CalculationError) -> MessagingResult<MessageId> {
        self.send(&self.dead_letter_queue, failure).await
    }

    async fn send<T: QueueMessage>(&self, queue_name: &str, message: &T) -> MessagingResult<MessageId> {
        info!(
            queue = %queue_name,
            message_type = message.message_type(),
            provider = self.provider.provider_name(),
            "Sending message to queue"
        );

        let result = tokio::time::timeout(self.timeout, self.provider.publish(queue_name, message))
            .await
            .map_err(|_| MessagingError::timeout("publish", self.timeout.as_millis() as u64))
            .and_then(|sent| sent);

        match &result {
            Ok(message_id) => info!(queue = %queue_name, message_id = %message_id, "Message sent successfully"),
            Err(e) => error!(queue = %queue_name, error = %e, "Send message failed"),
        }
        result
    }
}
