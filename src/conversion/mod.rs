//! # Unit Conversion
//!
//! Normalization of declared product quantities into kilograms.

pub mod normalizer;
pub mod unit_table;
pub mod unknown_units;

pub use normalizer::UnitNormalizer;
pub use unit_table::{UnitRule, UNIT_RULES};
pub use unknown_units::{FileUnknownUnitLog, InMemoryUnknownUnitLog, UnknownUnitLog};
