//! # Unit Normalizer
//!
//! Converts a declared `(amount, unit)` pair into kilograms.
//!
//! - A unit matching the table converts with the rule's ratio.
//! - The literal unit `undefined` is a hard input error.
//! - Any other unit is recorded in the unknown-units log and the raw amount is
//!   used unconverted.

use std::sync::Arc;
use tracing::{debug, info};

use super::unit_table;
use super::unknown_units::UnknownUnitLog;
use crate::config::UnitMatchPolicy;
use crate::constants::UNDEFINED_UNIT;
use crate::error::{FootprintError, FootprintResult};

#[derive(Debug, Clone)]
pub struct UnitNormalizer {
    policy: UnitMatchPolicy,
    unknown_units: Arc<dyn UnknownUnitLog>,
}

impl UnitNormalizer {
    pub fn new(policy: UnitMatchPolicy, unknown_units: Arc<dyn UnknownUnitLog>) -> Self {
        Self {
            policy,
            unknown_units,
        }
    }

    pub fn policy(&self) -> UnitMatchPolicy {
        self.policy
    }

    /// Normalize `amount` expressed in `unit_label` to kilograms
    pub fn normalize(&self, amount: f64, unit_label: &str) -> FootprintResult<f64> {
        if unit_label.trim().eq_ignore_ascii_case(UNDEFINED_UNIT) {
            return Err(FootprintError::invalid_unit(unit_label));
        }

        match unit_table::lookup(unit_label, self.policy) {
            Some(rule) => {
                let kilograms = amount * rule.ratio;
                info!(
                    amount = amount,
                    unit = %unit_label,
                    matched_unit = rule.label,
                    kilograms = kilograms,
                    "Product amount converted to kg"
                );
                Ok(kilograms)
            }
            None => {
                debug!(unit = %unit_label, "Unit not in conversion table, using raw amount");
                self.unknown_units.record(unit_label);
                Ok(amount)
            }
        }
    }
}
