//! Per-product and per-batch outcomes

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::FootprintError;
use crate::messaging::MessageId;
use crate::models::{BatchState, ProcessCalculation};

/// Result of processing one product of a batch
#[derive(Debug)]
pub enum ItemOutcome {
    /// Resolved, normalized and calculated
    Calculated(ProcessCalculation),

    /// Recoverable failure; the placeholder is recorded and the batch continues
    Skipped {
        placeholder: ProcessCalculation,
        reason: FootprintError,
    },

    /// Unrecoverable failure; the batch aborts
    Fatal(FootprintError),
}

impl ItemOutcome {
    /// Classify a failure raised while processing `product`.
    ///
    /// `process_name_found` is set when resolution already succeeded.
    pub fn from_error(
        error: FootprintError,
        product_name: &str,
        process_name_found: Option<String>,
        declared_amount: f64,
    ) -> Self {
        if error.is_recoverable() {
            Self::Skipped {
                placeholder: ProcessCalculation::uncalculated(
                    product_name,
                    process_name_found,
                    declared_amount,
                ),
                reason: error,
            }
        } else {
            Self::Fatal(error)
        }
    }
}

/// Terminal report of one batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub calculation_id: Uuid,

    /// `Completed` or `Failed`
    pub state: BatchState,

    /// Id of the message published to the result or dead-letter queue, if any
    pub message_id: Option<i64>,

    /// Products processed before the batch terminated
    pub processed: usize,

    pub calculated_percentage: f64,
}

impl BatchOutcome {
    pub fn completed(
        calculation_id: Uuid,
        message_id: MessageId,
        processed: usize,
        calculated_percentage: f64,
    ) -> Self {
        Self {
            calculation_id,
            state: BatchState::Completed,
            message_id: Some(message_id.0),
            processed,
            calculated_percentage,
        }
    }

    pub fn failed(calculation_id: Uuid, message_id: Option<MessageId>, processed: usize) -> Self {
        Self {
            calculation_id,
            state: BatchState::Failed,
            message_id: message_id.map(|id| id.0),
            processed,
            calculated_percentage: 0.0,
        }
    }
}
