//! # Calculation Executor
//!
//! Drives one calculation through the Impact Engine:
//!
//! 1. create a product system for the resolved process
//! 2. look up the impact method and the product system by name
//! 3. build an upstream-analysis setup for the kilogram amount
//! 4. calculate
//! 5. read the first impact result
//! 6. dispose the engine-side result
//!
//! Every engine failure, including a timeout, surfaces as a recoverable
//! `FootprintError::Calculation`. Once `calculate` has returned, the result is
//! disposed on every path before `execute` returns.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    CalculationSetup, CalculationType, EngineError, EngineResult, ImpactEngine, ProcessType,
    ProviderLinking, SimpleResult,
};
use crate::error::{FootprintError, FootprintResult};
use crate::models::ResolvedProcess;

/// Scalar impact extracted from an engine result
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactValue {
    pub value: f64,
    pub unit: String,
}

#[derive(Debug, Clone)]
pub struct CalculationExecutor {
    engine: Arc<dyn ImpactEngine>,
    impact_method: String,
    timeout: Duration,
}

impl CalculationExecutor {
    pub fn new(engine: Arc<dyn ImpactEngine>, impact_method: impl Into<String>, timeout: Duration) -> Self {
        Self {
            engine,
            impact_method: impact_method.into(),
            timeout,
        }
    }

    pub fn impact_method(&self) -> &str {
        &self.impact_method
    }

    /// Run one calculation for `process` at `amount_kg`
    pub async fn execute(
        &self,
        process: &ResolvedProcess,
        amount_kg: f64,
    ) -> FootprintResult<ImpactValue> {
        let fail = |e: EngineError| FootprintError::calculation(&process.name, e.to_string());

        info!(process = %process.name, process_id = %process.id, "Creating product system");
        self.bounded(
            "create_product_system",
            self.engine.create_product_system(
                &process.id,
                ProviderLinking::Prefer,
                ProcessType::UnitProcess,
            ),
        )
        .await
        .map_err(fail)?;

        let impact_method = self
            .bounded(
                "find_impact_method",
                self.engine.find_impact_method(&self.impact_method),
            )
            .await
            .map_err(fail)?
            .ok_or_else(|| {
                FootprintError::calculation(
                    &process.name,
                    format!("impact method not found: {}", self.impact_method),
                )
            })?;

        let product_system = self
            .bounded(
                "find_product_system",
                self.engine.find_product_system(&process.name),
            )
            .await
            .map_err(fail)?
            .ok_or_else(|| {
                FootprintError::calculation(&process.name, "product system not found")
            })?;

        debug!(process = %process.name, "Perform calculation setup");
        let setup = CalculationSetup {
            calculation_type: CalculationType::UpstreamAnalysis,
            impact_method,
            product_system,
            amount: amount_kg,
        };

        info!(
            process = %process.name,
            amount_kg = amount_kg,
            "Starting calculation"
        );
        let result = self
            .bounded("calculate", self.engine.calculate(&setup))
            .await
            .map_err(|e| {
                // The engine may still finish and hold a result nobody disposes
                if matches!(e, EngineError::Timeout { .. }) {
                    warn!(
                        process = %process.name,
                        process_id = %process.id,
                        product_system_id = %setup.product_system.id,
                        "Calculation timed out; engine may retain an undisposed result"
                    );
                }
                fail(e)
            })?;

        let extracted = Self::extract(&result).ok_or_else(|| {
            FootprintError::calculation(&process.name, "calculation returned no impact results")
        });

        self.release(&result).await;

        let impact = extracted?;
        info!(
            process = %process.name,
            value = impact.value,
            unit = %impact.unit,
            "Calculation completed"
        );
        Ok(impact)
    }

    fn extract(result: &SimpleResult) -> Option<ImpactValue> {
        result.impact_results.first().map(|impact| ImpactValue {
            value: impact.value,
            unit: impact.impact_category.ref_unit.clone(),
        })
    }

    async fn release(&self, result: &SimpleResult) {
        debug!(result_id = %result.id, "Disposing calculation result");
        if let Err(e) = self.bounded("dispose", self.engine.dispose(result)).await {
            warn!(result_id = %result.id, error = %e, "Failed to dispose calculation result");
        }
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        call: impl Future<Output = EngineResult<T>>,
    ) -> EngineResult<T> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| EngineError::timeout(operation, self.timeout.as_millis() as u64))?
    }
}
