//! # Queue Message Payloads
//!
//! Payload types published by the orchestrator. Normal results go to the
//! result queue, terminal failures to the dead-letter queue.

use serde::Serialize;

use crate::models::{CalculationError, FoodCalculation};

/// A payload that can be published to a queue
pub trait QueueMessage: Serialize + Send + Sync {
    /// Short type name used in logs
    fn message_type(&self) -> &'static str;

    /// Serialize to the JSON document stored in the queue
    fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl QueueMessage for FoodCalculation {
    fn message_type(&self) -> &'static str {
        "food_calculation"
    }
}

impl QueueMessage for CalculationError {
    fn message_type(&self) -> &'static str {
        "calculation_error"
    }
}

impl QueueMessage for serde_json::Value {
    fn message_type(&self) -> &'static str {
        "json"
    }
}

/// Identifier assigned by the provider to a published message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub i64);

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MessageId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
