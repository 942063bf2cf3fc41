//! # Messaging Module
//!
//! Outbound queues for batch results. A completed batch publishes its
//! `FoodCalculation` to the result queue; an aborted batch publishes a
//! `CalculationError` to the dead-letter queue.

pub mod errors;
pub mod message;
pub mod provider;
pub mod providers;
pub mod publisher;

pub use errors::{MessagingError, MessagingResult};
pub use message::{MessageId, QueueMessage};
pub use provider::MessagingProvider;
pub use publisher::ResultPublisher;
