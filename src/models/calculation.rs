//! Calculation result models
//!
//! `FoodCalculation` is the payload of the result queue, `CalculationError`
//! the payload of the dead-letter queue. A batch produces exactly one of them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::IMPACT_UNIT;

/// Outcome of one product of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessCalculation {
    /// Product name as requested
    pub name: String,

    /// Catalog process the product was resolved to
    pub process_name_found: Option<String>,

    /// Impact value, absent when the product could not be calculated
    pub value: Option<f64>,

    /// Declared product amount
    pub amount: f64,

    /// Impact unit label
    pub unit: String,

    pub calculated: bool,
}

impl ProcessCalculation {
    /// A fully populated, successful calculation
    pub fn calculated(
        name: impl Into<String>,
        process_name_found: impl Into<String>,
        value: f64,
        amount: f64,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            process_name_found: Some(process_name_found.into()),
            value: Some(value),
            amount,
            unit: unit.into(),
            calculated: true,
        }
    }

    /// Placeholder for a product that could not be calculated.
    ///
    /// `amount` is the declared amount, never the converted one.
    pub fn uncalculated(
        name: impl Into<String>,
        process_name_found: Option<String>,
        amount: f64,
    ) -> Self {
        Self {
            name: name.into(),
            process_name_found,
            value: None,
            amount,
            unit: IMPACT_UNIT.to_string(),
            calculated: false,
        }
    }
}

/// Accumulated result of one batch, in input order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodCalculation {
    pub calculation_id: Uuid,

    /// Share of products calculated successfully, in `[0, 1]`
    pub calculated_percentage: f64,

    pub process_calculations: Vec<ProcessCalculation>,

    #[serde(skip)]
    total_products: usize,

    #[serde(skip)]
    calculated_count: usize,
}

impl FoodCalculation {
    pub fn new(calculation_id: Uuid, total_products: usize) -> Self {
        Self {
            calculation_id,
            calculated_percentage: 0.0,
            process_calculations: Vec::with_capacity(total_products),
            total_products,
            calculated_count: 0,
        }
    }

    /// Append a product outcome, advancing the percentage when it was calculated
    pub fn push(&mut self, calculation: ProcessCalculation) {
        if calculation.calculated {
            self.calculated_count += 1;
            // Derived from counts so that n of n products yields exactly 1.0
            self.calculated_percentage = if self.total_products == 0 {
                0.0
            } else {
                (self.calculated_count as f64 / self.total_products as f64).min(1.0)
            };
        }
        self.process_calculations.push(calculation);
    }

    pub fn calculated_count(&self) -> usize {
        self.calculated_count
    }

    pub fn total_products(&self) -> usize {
        self.total_products
    }

    pub fn is_complete(&self) -> bool {
        self.process_calculations.len() == self.total_products
    }
}

/// Terminal artifact routed to the dead-letter queue when a batch aborts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationError {
    pub calculation_id: Uuid,
    pub error_message: String,
}

impl CalculationError {
    pub fn new(calculation_id: Uuid, error_message: impl Into<String>) -> Self {
        Self {
            calculation_id,
            error_message: error_message.into(),
        }
    }
}
