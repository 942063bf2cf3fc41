//! Shared mock collaborators for integration tests
//!
//! Mocks record the calls they receive so tests can assert on interaction
//! order (create, lookups, calculate, dispose) as well as on results.

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

use food_footprint::catalog::{
    CatalogError, CatalogResult, FuzzyMatcher, ProcessCatalog, ProcessResolver,
    ResolutionStrategy, SearchIndex,
};
use food_footprint::constants::{DEFAULT_IMPACT_METHOD, IMPACT_UNIT};
use food_footprint::config::UnitMatchPolicy;
use food_footprint::conversion::{InMemoryUnknownUnitLog, UnitNormalizer};
use food_footprint::engine::{
    CalculationExecutor, CalculationSetup, EngineError, EngineResult, EntityRef,
    ImpactCategoryRef, ImpactEngine, ImpactResult, ProcessType, ProviderLinking, SimpleResult,
};
use food_footprint::messaging::providers::InMemoryMessagingService;
use food_footprint::messaging::{MessagingProvider, ResultPublisher};
use food_footprint::models::CatalogEntry;
use food_footprint::orchestration::BatchOrchestrator;

pub const RESULT_QUEUE: &str = "test_food_calculations";
pub const DEAD_LETTER_QUEUE: &str = "test_food_calculations_dlq";

/// Impact per kilogram returned by [`MockImpactEngine`]
pub const IMPACT_PER_KG: f64 = 0.5;

/// Catalog listing served from memory
#[derive(Debug, Default)]
pub struct MockCatalog {
    entries: Vec<CatalogEntry>,
    fail: bool,
    gate: Option<Arc<Semaphore>>,
    list_calls: Mutex<usize>,
}

impl MockCatalog {
    pub fn with_names(names: &[&str]) -> Self {
        Self {
            entries: names
                .iter()
                .enumerate()
                .map(|(i, name)| CatalogEntry::new(format!("proc-{i}"), *name))
                .collect(),
            ..Default::default()
        }
    }

    /// Listing that waits for a permit on `gate` before answering
    pub fn gated(names: &[&str], gate: Arc<Semaphore>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::with_names(names)
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock()
    }
}

#[async_trait]
impl ProcessCatalog for MockCatalog {
    async fn list_all(&self) -> CatalogResult<Vec<CatalogEntry>> {
        *self.list_calls.lock() += 1;
        if let Some(gate) = &self.gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }
        if self.fail {
            return Err(CatalogError::transport("list_all", "connection refused"));
        }
        Ok(self.entries.clone())
    }
}

/// Search index answering from a fixed product-name table
#[derive(Debug, Default)]
pub struct MockSearchIndex {
    hits: HashMap<String, Vec<CatalogEntry>>,
    queries: Mutex<Vec<String>>,
}

impl MockSearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hit(mut self, query: &str, id: &str, name: &str) -> Self {
        self.hits
            .entry(query.to_string())
            .or_default()
            .push(CatalogEntry::new(id, name));
        self
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl SearchIndex for MockSearchIndex {
    async fn search(&self, text: &str) -> CatalogResult<Vec<CatalogEntry>> {
        self.queries.lock().push(text.to_string());
        Ok(self.hits.get(text).cloned().unwrap_or_default())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MockEngineState {
    /// Every call in order, e.g. `create:proc-0`, `calculate:apple production`, `dispose:r-1`
    pub calls: Vec<String>,
    pub setups: Vec<CalculationSetup>,
    pub outstanding: HashSet<String>,
    pub disposed: Vec<String>,
}

/// Impact engine returning `amount * IMPACT_PER_KG` kg CO2 eq
#[derive(Debug, Default)]
pub struct MockImpactEngine {
    state: Mutex<MockEngineState>,
    failing_processes: HashSet<String>,
    next_result: Mutex<u64>,
}

impl MockImpactEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `calculate` fail for the product system named `process_name`
    pub fn failing_for(mut self, process_name: &str) -> Self {
        self.failing_processes.insert(process_name.to_string());
        self
    }

    pub fn state(&self) -> MockEngineState {
        self.state.lock().clone()
    }

    pub fn calculate_count(&self) -> usize {
        self.state.lock().setups.len()
    }
}

#[async_trait]
impl ImpactEngine for MockImpactEngine {
    async fn create_product_system(
        &self,
        process_id: &str,
        _provider_linking: ProviderLinking,
        _preferred_type: ProcessType,
    ) -> EngineResult<EntityRef> {
        self.state.lock().calls.push(format!("create:{process_id}"));
        Ok(EntityRef::new(format!("ps-{process_id}"), process_id))
    }

    async fn find_impact_method(&self, name: &str) -> EngineResult<Option<EntityRef>> {
        self.state.lock().calls.push(format!("method:{name}"));
        Ok(Some(EntityRef::new("method-1", name)))
    }

    async fn find_product_system(&self, name: &str) -> EngineResult<Option<EntityRef>> {
        self.state.lock().calls.push(format!("system:{name}"));
        Ok(Some(EntityRef::new(format!("ps-{name}"), name)))
    }

    async fn calculate(&self, setup: &CalculationSetup) -> EngineResult<SimpleResult> {
        let mut state = self.state.lock();
        state
            .calls
            .push(format!("calculate:{}", setup.product_system.name));
        state.setups.push(setup.clone());

        // At most one engine-side result may be alive at a time
        assert!(
            state.outstanding.is_empty(),
            "calculate called while {:?} not disposed",
            state.outstanding
        );

        if self.failing_processes.contains(&setup.product_system.name) {
            return Err(EngineError::rpc("calculate", 500, "no provider found"));
        }

        let mut next = self.next_result.lock();
        *next += 1;
        let id = format!("r-{}", *next);
        state.outstanding.insert(id.clone());

        Ok(SimpleResult {
            id,
            impact_results: vec![ImpactResult {
                impact_category: ImpactCategoryRef {
                    name: "Climate change - GWP 100a".to_string(),
                    ref_unit: IMPACT_UNIT.to_string(),
                },
                value: setup.amount * IMPACT_PER_KG,
            }],
        })
    }

    async fn dispose(&self, result: &SimpleResult) -> EngineResult<()> {
        let mut state = self.state.lock();
        state.calls.push(format!("dispose:{}", result.id));
        state.outstanding.remove(&result.id);
        state.disposed.push(result.id.clone());
        Ok(())
    }
}

/// Orchestrator wired to mocks, with handles to inspect them
pub struct TestHarness {
    pub orchestrator: Arc<BatchOrchestrator>,
    pub engine: Arc<MockImpactEngine>,
    pub unknown_units: Arc<InMemoryUnknownUnitLog>,
    pub publisher: ResultPublisher,
}

impl TestHarness {
    /// Fuzzy strategy over `catalog`, matching `<product> production`
    pub async fn fuzzy(catalog: Arc<dyn ProcessCatalog>, engine: MockImpactEngine) -> Self {
        let strategy = ResolutionStrategy::FuzzyListing {
            catalog,
            matcher: FuzzyMatcher::new(60.0),
            name_suffix: Some(" production".to_string()),
        };
        Self::build(strategy, engine).await
    }

    pub async fn indexed(index: Arc<dyn SearchIndex>, engine: MockImpactEngine) -> Self {
        Self::build(ResolutionStrategy::IndexSearch { index }, engine).await
    }

    async fn build(strategy: ResolutionStrategy, engine: MockImpactEngine) -> Self {
        let timeout = Duration::from_secs(5);
        let engine = Arc::new(engine);
        let unknown_units = Arc::new(InMemoryUnknownUnitLog::new());

        let provider = Arc::new(MessagingProvider::InMemory(InMemoryMessagingService::new()));
        let publisher = ResultPublisher::new(provider, RESULT_QUEUE, DEAD_LETTER_QUEUE, timeout);
        publisher
            .ensure_queues()
            .await
            .expect("in-memory queues are always creatable");

        let orchestrator = BatchOrchestrator::new(
            ProcessResolver::new(strategy, timeout),
            UnitNormalizer::new(UnitMatchPolicy::Permissive, unknown_units.clone()),
            CalculationExecutor::new(engine.clone(), DEFAULT_IMPACT_METHOD, timeout),
            publisher.clone(),
        );

        Self {
            orchestrator: Arc::new(orchestrator),
            engine,
            unknown_units,
            publisher,
        }
    }

    fn memory(&self) -> &InMemoryMessagingService {
        self.publisher
            .provider()
            .as_in_memory()
            .expect("harness uses the in-memory provider")
    }

    pub async fn results(&self) -> Vec<serde_json::Value> {
        self.memory().messages(RESULT_QUEUE).await
    }

    pub async fn dead_letters(&self) -> Vec<serde_json::Value> {
        self.memory().messages(DEAD_LETTER_QUEUE).await
    }
}
