//! # Impact Engine
//!
//! Contract of the external life-cycle-assessment calculation service and the
//! executor driving one calculation through it.
//!
//! - [`ImpactEngine`] - collaborator trait (product systems, lookups, calculate, dispose)
//! - [`CalculationExecutor`] - setup/calculate/dispose lifecycle for one product
//! - [`OlcaIpcClient`] - JSON-RPC client for an openLCA IPC server

pub mod errors;
pub mod executor;
pub mod ipc_client;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use errors::{EngineError, EngineResult};
pub use executor::{CalculationExecutor, ImpactValue};
pub use ipc_client::OlcaIpcClient;

/// Reference to an entity held by the engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl EntityRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// How default providers are linked when building a product system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderLinking {
    Ignore,
    Prefer,
    Only,
}

/// Preferred process type when building a product system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessType {
    UnitProcess,
    LciResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationType {
    SimpleCalculation,
    ContributionAnalysis,
    UpstreamAnalysis,
}

/// Calculation request sent to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSetup {
    pub calculation_type: CalculationType,
    pub impact_method: EntityRef,
    pub product_system: EntityRef,
    /// Reference amount in kilograms
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactCategoryRef {
    #[serde(default)]
    pub name: String,
    pub ref_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactResult {
    pub impact_category: ImpactCategoryRef,
    pub value: f64,
}

/// Engine-side result object; must be disposed after use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleResult {
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(default)]
    pub impact_results: Vec<ImpactResult>,
}

/// External impact-calculation engine
#[async_trait]
pub trait ImpactEngine: Send + Sync + std::fmt::Debug {
    /// Build a product system for a process
    async fn create_product_system(
        &self,
        process_id: &str,
        provider_linking: ProviderLinking,
        preferred_type: ProcessType,
    ) -> EngineResult<EntityRef>;

    async fn find_impact_method(&self, name: &str) -> EngineResult<Option<EntityRef>>;

    async fn find_product_system(&self, name: &str) -> EngineResult<Option<EntityRef>>;

    async fn calculate(&self, setup: &CalculationSetup) -> EngineResult<SimpleResult>;

    /// Release the server-side state held for `result`
    async fn dispose(&self, result: &SimpleResult) -> EngineResult<()>;
}
