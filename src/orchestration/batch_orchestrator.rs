//! # Batch Orchestrator
//!
//! Runs one calculation batch from start to its single published message.
//!
//! ```text
//! Pending ──▶ Running ──┬──▶ Completed   FoodCalculation on the result queue
//!                       └──▶ Failed      CalculationError on the dead-letter queue
//! ```
//!
//! Each product goes through resolve, normalize and execute in that order.
//! Recoverable failures (`NotFound`, `Calculation`) record an uncalculated
//! placeholder and the loop continues. Any other failure stops the loop: the
//! remaining products are never touched and no `FoodCalculation` is published.

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::outcome::{BatchOutcome, ItemOutcome};
use crate::catalog::{BatchResolver, ProcessResolver};
use crate::constants::events;
use crate::conversion::UnitNormalizer;
use crate::engine::CalculationExecutor;
use crate::error::FootprintError;
use crate::logging::{log_batch_operation, log_error, log_item_operation};
use crate::messaging::ResultPublisher;
use crate::models::{BatchState, CalculationError, FoodCalculation, ProcessCalculation, Product};

#[derive(Debug, Clone)]
pub struct BatchOrchestrator {
    resolver: ProcessResolver,
    normalizer: UnitNormalizer,
    executor: CalculationExecutor,
    publisher: ResultPublisher,
}

impl BatchOrchestrator {
    pub fn new(
        resolver: ProcessResolver,
        normalizer: UnitNormalizer,
        executor: CalculationExecutor,
        publisher: ResultPublisher,
    ) -> Self {
        Self {
            resolver,
            normalizer,
            executor,
            publisher,
        }
    }

    pub fn publisher(&self) -> &ResultPublisher {
        &self.publisher
    }

    /// Process `products` sequentially and publish exactly one terminal message
    pub async fn run_batch(&self, calculation_id: Uuid, products: Vec<Product>) -> BatchOutcome {
        let total = products.len();
        let mut state = BatchState::Pending;
        transition(&mut state, BatchState::Running, calculation_id);
        log_batch_operation(events::BATCH_STARTED, calculation_id, Some(total), "running", None);

        let batch_resolver = match self.resolver.prepare().await {
            Ok(resolver) => resolver,
            Err(e) => return self.abort(&mut state, calculation_id, 0, e).await,
        };

        let mut calculation = FoodCalculation::new(calculation_id, total);

        for product in &products {
            match self.process_item(calculation_id, &batch_resolver, product).await {
                ItemOutcome::Calculated(result) => {
                    log_item_operation(
                        events::ITEM_CALCULATED,
                        calculation_id,
                        &product.name,
                        result.process_name_found.as_deref(),
                        "calculated",
                        None,
                    );
                    calculation.push(result);
                }
                ItemOutcome::Skipped {
                    placeholder,
                    reason,
                } => {
                    log_item_operation(
                        events::ITEM_SKIPPED,
                        calculation_id,
                        &product.name,
                        placeholder.process_name_found.as_deref(),
                        "uncalculated",
                        Some(&reason.to_string()),
                    );
                    calculation.push(placeholder);
                }
                ItemOutcome::Fatal(e) => {
                    log_item_operation(
                        events::ITEM_FATAL,
                        calculation_id,
                        &product.name,
                        None,
                        "fatal",
                        Some(&e.to_string()),
                    );
                    let processed = calculation.process_calculations.len();
                    return self.abort(&mut state, calculation_id, processed, e).await;
                }
            }

            debug!(
                calculation_id = %calculation_id,
                calculated_percentage = calculation.calculated_percentage,
                "Calculation progress"
            );
        }

        debug_assert!(calculation.is_complete());
        let processed = calculation.process_calculations.len();
        match self.publisher.publish_result(&calculation).await {
            Ok(message_id) => {
                transition(&mut state, BatchState::Completed, calculation_id);
                log_batch_operation(
                    events::BATCH_COMPLETED,
                    calculation_id,
                    Some(total),
                    "completed",
                    Some(&format!(
                        "calculated_percentage={}",
                        calculation.calculated_percentage
                    )),
                );
                BatchOutcome::completed(
                    calculation_id,
                    message_id,
                    processed,
                    calculation.calculated_percentage,
                )
            }
            Err(e) => {
                self.abort(&mut state, calculation_id, processed, e.into())
                    .await
            }
        }
    }

    async fn process_item(
        &self,
        calculation_id: Uuid,
        resolver: &BatchResolver,
        product: &Product,
    ) -> ItemOutcome {
        info!(
            calculation_id = %calculation_id,
            product = %product.name,
            unit = %product.unit,
            amount = product.amount,
            "Processing product"
        );

        let process = match resolver.resolve(&product.name).await {
            Ok(process) => process,
            Err(e) => return ItemOutcome::from_error(e, &product.name, None, product.amount),
        };

        let amount_kg = match self.normalizer.normalize(product.amount, &product.unit) {
            Ok(amount_kg) => amount_kg,
            Err(e) => {
                return ItemOutcome::from_error(
                    e,
                    &product.name,
                    Some(process.name),
                    product.amount,
                )
            }
        };

        match self.executor.execute(&process, amount_kg).await {
            Ok(impact) => ItemOutcome::Calculated(ProcessCalculation::calculated(
                &product.name,
                &process.name,
                impact.value,
                product.amount,
                impact.unit,
            )),
            Err(e) => {
                ItemOutcome::from_error(e, &product.name, Some(process.name), product.amount)
            }
        }
    }

    /// Route the failure to the dead-letter queue and end the batch
    async fn abort(
        &self,
        state: &mut BatchState,
        calculation_id: Uuid,
        processed: usize,
        cause: FootprintError,
    ) -> BatchOutcome {
        error!(
            calculation_id = %calculation_id,
            error_code = cause.error_code(),
            error = %cause,
            "Batch aborted"
        );

        let failure = CalculationError::new(calculation_id, cause.to_string());
        let message_id = match self.publisher.publish_failure(&failure).await {
            Ok(message_id) => Some(message_id),
            Err(e) => {
                log_error(
                    "batch_orchestrator",
                    "publish_failure",
                    &e.to_string(),
                    Some(&calculation_id.to_string()),
                );
                None
            }
        };

        transition(state, BatchState::Failed, calculation_id);
        log_batch_operation(
            events::BATCH_FAILED,
            calculation_id,
            None,
            "failed",
            Some(&cause.to_string()),
        );
        BatchOutcome::failed(calculation_id, message_id, processed)
    }
}

fn transition(state: &mut BatchState, next: BatchState, calculation_id: Uuid) {
    if !state.can_transition_to(next) {
        warn!(
            calculation_id = %calculation_id,
            from = %state,
            to = %next,
            "Unexpected batch state transition"
        );
    }
    debug!(calculation_id = %calculation_id, from = %state, to = %next, "Batch state transition");
    *state = next;
}
