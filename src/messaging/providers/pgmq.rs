//! # PGMQ Messaging Provider
//!
//! PostgreSQL message queue (pgmq) sink using the pgmq-rs crate.

use pgmq::PGMQueue;
use tracing::{debug, info};

use crate::messaging::errors::{MessagingError, MessagingResult};
use crate::messaging::message::{MessageId, QueueMessage};

#[derive(Debug, Clone)]
pub struct PgmqMessagingService {
    pgmq: PGMQueue,
}

impl PgmqMessagingService {
    /// Connect using a PostgreSQL connection string
    pub async fn new(database_url: &str) -> MessagingResult<Self> {
        info!("Connecting to pgmq");

        let pgmq = PGMQueue::new(database_url.to_string())
            .await
            .map_err(|e| MessagingError::configuration("pgmq", e.to_string()))?;

        info!("Connected to pgmq");
        Ok(Self { pgmq })
    }

    /// Create queue if it doesn't exist
    pub async fn ensure_queue(&self, queue_name: &str) -> MessagingResult<()> {
        debug!(queue = %queue_name, "Ensuring pgmq queue");

        self.pgmq.create(queue_name).await.map_err(|e| {
            MessagingError::queue_operation(queue_name, "create", e.to_string())
        })?;

        Ok(())
    }

    pub async fn send_message<T: QueueMessage>(
        &self,
        queue_name: &str,
        message: &T,
    ) -> MessagingResult<MessageId> {
        let payload = message.to_json()?;

        let message_id = self
            .pgmq
            .send(queue_name, &payload)
            .await
            .map_err(|e| MessagingError::queue_operation(queue_name, "send", e.to_string()))?;

        debug!(queue = %queue_name, message_id = message_id, "Message sent");
        Ok(MessageId(message_id))
    }
}
