#![allow(clippy::doc_markdown)] // Allow technical terms like openLCA, PostgreSQL in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Food Footprint
//!
//! Carbon-footprint estimation for batches of food products.
//!
//! ## Overview
//!
//! A caller submits a list of `{name, unit, amount}` products and immediately
//! receives a calculation id. In the background each product is matched to a
//! production process of a life-cycle-assessment catalog, its amount is
//! converted to kilograms, and an external impact engine computes its global
//! warming potential. The batch ends with exactly one message: a
//! `FoodCalculation` on the result queue, or a `CalculationError` on the
//! dead-letter queue when the batch had to be aborted.
//!
//! ## Module Organization
//!
//! - [`conversion`] - unit normalization to kilograms and the unknown-units log
//! - [`catalog`] - process resolution by index search or fuzzy matching
//! - [`engine`] - impact engine contract, IPC client and calculation executor
//! - [`orchestration`] - batch loop, background scheduler and bootstrap
//! - [`messaging`] - result and dead-letter queue publishing
//! - [`web`] - HTTP front door
//! - [`config`] - layered configuration
//! - [`error`] - recoverable/fatal error taxonomy
//! - [`logging`] - structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use food_footprint::config::ConfigManager;
//! use food_footprint::models::Product;
//! use food_footprint::orchestration::OrchestrationSystemHandle;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config_manager = ConfigManager::load()?;
//! let system = OrchestrationSystemHandle::bootstrap(config_manager).await?;
//!
//! let calculation_id = system
//!     .scheduler
//!     .submit(vec![Product::new("apple", "kg", 2.0)])?;
//! println!("Accepted calculation {calculation_id}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod constants;
pub mod conversion;
pub mod engine;
pub mod error;
pub mod logging;
pub mod messaging;
pub mod models;
pub mod orchestration;
pub mod web;

pub use config::{ConfigManager, FootprintConfig};
pub use error::{FootprintError, FootprintResult};
pub use models::{CalculationError, FoodCalculation, ProcessCalculation, Product};
pub use orchestration::{BatchOrchestrator, BatchOutcome, BatchScheduler};
