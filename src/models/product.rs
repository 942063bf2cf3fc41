//! Product input model
//!
//! One requested item of a batch, exactly as declared by the caller.

use serde::{Deserialize, Serialize};

fn default_amount() -> f64 {
    1.0
}

/// A named food product with its declared quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Free-text product name (e.g. "apple")
    pub name: String,

    /// Free-text unit label (e.g. "kg", "2 ounces", "1 clove, minced")
    pub unit: String,

    /// Declared quantity in `unit`
    #[serde(default = "default_amount")]
    pub amount: f64,
}

impl Product {
    pub fn new(name: impl Into<String>, unit: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            amount,
        }
    }
}
