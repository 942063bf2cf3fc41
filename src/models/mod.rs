//! # Data Models
//!
//! Inputs, transient process references and published results of a batch.

pub mod batch_state;
pub mod calculation;
pub mod process;
pub mod product;

pub use batch_state::BatchState;
pub use calculation::{CalculationError, FoodCalculation, ProcessCalculation};
pub use process::{CatalogEntry, ResolvedProcess};
pub use product::Product;
