//! # Orchestration
//!
//! Batch execution for footprint calculations.
//!
//! - **BatchOrchestrator**: per-product resolve, normalize and execute loop with
//!   recoverable/fatal failure classification and result publication
//! - **BatchScheduler**: bounded hand-off from the HTTP front door to a single
//!   sequential background worker
//! - **Bootstrap**: wires configured collaborators into a running system

pub mod batch_orchestrator;
pub mod bootstrap;
pub mod outcome;
pub mod scheduler;

pub use batch_orchestrator::BatchOrchestrator;
pub use bootstrap::{build_orchestrator, OrchestrationSystemHandle};
pub use outcome::{BatchOutcome, ItemOutcome};
pub use scheduler::BatchScheduler;
