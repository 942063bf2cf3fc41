//! # Messaging Provider Enum
//!
//! Enum dispatch over the available sinks instead of `Arc<dyn ...>`: the set of
//! providers is closed and the publish methods are generic.

use super::errors::MessagingResult;
use super::message::{MessageId, QueueMessage};
use super::providers::{InMemoryMessagingService, PgmqMessagingService};

#[derive(Debug)]
pub enum MessagingProvider {
    /// PostgreSQL message queue
    Pgmq(PgmqMessagingService),

    /// In-memory queues for tests and local runs
    InMemory(InMemoryMessagingService),
}

impl MessagingProvider {
    /// Get the provider name for logging
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::Pgmq(_) => "pgmq",
            Self::InMemory(_) => "in_memory",
        }
    }

    /// Create a queue if it doesn't exist
    pub async fn ensure_queue(&self, queue_name: &str) -> MessagingResult<()> {
        match self {
            Self::Pgmq(s) => s.ensure_queue(queue_name).await,
            Self::InMemory(s) => s.ensure_queue(queue_name).await,
        }
    }

    /// Bulk queue creation
    pub async fn ensure_queues(&self, queue_names: &[&str]) -> MessagingResult<()> {
        for queue_name in queue_names {
            self.ensure_queue(queue_name).await?;
        }
        Ok(())
    }

    /// Publish a payload to a queue
    pub async fn publish<T: QueueMessage>(
        &self,
        queue_name: &str,
        message: &T,
    ) -> MessagingResult<MessageId> {
        match self {
            Self::Pgmq(s) => s.send_message(queue_name, message).await,
            Self::InMemory(s) => s.send_message(queue_name, message).await,
        }
    }

    /// Access the in-memory provider (tests and diagnostics)
    pub fn as_in_memory(&self) -> Option<&InMemoryMessagingService> {
        match self {
            Self::InMemory(s) => Some(s),
            _ => None,
        }
    }
}
