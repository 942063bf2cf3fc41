//! # Messaging Providers

pub mod in_memory;
pub mod pgmq;

pub use in_memory::{InMemoryMessagingService, StoredMessage};
pub use self::pgmq::PgmqMessagingService;
