//! # In-Memory Messaging Provider
//!
//! Queue storage in process memory for tests and local development.
//! Published payloads are kept as JSON documents in FIFO order.

use std::collections::{HashMap, VecDeque};

use tokio::sync::RwLock;

use crate::messaging::errors::{MessagingError, MessagingResult};
use crate::messaging::message::{MessageId, QueueMessage};

#[derive(Debug, Clone)]
pub struct StoredMessage {
    pub id: MessageId,
    pub payload: serde_json::Value,
}

#[derive(Debug, Default)]
struct InMemoryQueue {
    messages: VecDeque<StoredMessage>,
    next_id: i64,
}

impl InMemoryQueue {
    fn new() -> Self {
        Self {
            messages: VecDeque::new(),
            next_id: 1,
        }
    }
}

/// In-memory message sink
///
/// # Example
///
/// ```rust
/// use food_footprint::messaging::providers::InMemoryMessagingService;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = InMemoryMessagingService::new();
/// service.ensure_queue("food_calculations").await?;
///
/// let id = service
///     .send_message("food_calculations", &serde_json::json!({"key": "value"}))
///     .await?;
/// assert_eq!(service.queue_length("food_calculations").await, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryMessagingService {
    queues: RwLock<HashMap<String, InMemoryQueue>>,
}

impl InMemoryMessagingService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with pre-initialized queues
    pub fn with_queues(queue_names: &[&str]) -> Self {
        let queues = queue_names
            .iter()
            .map(|name| (name.to_string(), InMemoryQueue::new()))
            .collect();
        Self {
            queues: RwLock::new(queues),
        }
    }

    pub async fn ensure_queue(&self, queue_name: &str) -> MessagingResult<()> {
        let mut queues = self.queues.write().await;
        queues
            .entry(queue_name.to_string())
            .or_insert_with(InMemoryQueue::new);
        Ok(())
    }

    pub async fn send_message<T: QueueMessage>(
        &self,
        queue_name: &str,
        message: &T,
    ) -> MessagingResult<MessageId> {
        let payload = message.to_json()?;

        let mut queues = self.queues.write().await;
        let queue = queues
            .get_mut(queue_name)
            .ok_or_else(|| MessagingError::queue_not_found(queue_name))?;

        let id = MessageId(queue.next_id);
        queue.next_id += 1;
        queue.messages.push_back(StoredMessage { id, payload });

        Ok(id)
    }

    /// Get the number of messages in a queue (for testing)
    pub async fn queue_length(&self, queue_name: &str) -> usize {
        let queues = self.queues.read().await;
        queues
            .get(queue_name)
            .map(|q| q.messages.len())
            .unwrap_or(0)
    }

    /// Snapshot of the payloads in a queue, oldest first
    pub async fn messages(&self, queue_name: &str) -> Vec<serde_json::Value> {
        let queues = self.queues.read().await;
        queues
            .get(queue_name)
            .map(|q| q.messages.iter().map(|m| m.payload.clone()).collect())
            .unwrap_or_default()
    }

    /// Clear all messages from a queue (for testing)
    pub async fn clear_queue(&self, queue_name: &str) {
        let mut queues = self.queues.write().await;
        if let Some(queue) = queues.get_mut(queue_name) {
            queue.messages.clear();
        }
    }
}
