//! Batch orchestration against mock collaborators
//!
//! Covers the per-item recoverable path, the fatal abort path, progress
//! tracking and the single-message-per-batch contract.

mod common;

use std::sync::Arc;
use uuid::Uuid;

use common::{MockCatalog, MockImpactEngine, MockSearchIndex, TestHarness, IMPACT_PER_KG};
use food_footprint::constants::{DEFAULT_IMPACT_METHOD, IMPACT_UNIT};
use food_footprint::models::{BatchState, Product};

const CATALOG: &[&str] = &["apple production", "carrot production"];

async fn fuzzy_harness() -> TestHarness {
    TestHarness::fuzzy(Arc::new(MockCatalog::with_names(CATALOG)), MockImpactEngine::new()).await
}

#[tokio::test]
async fn test_single_resolvable_product_is_calculated() {
    let harness = fuzzy_harness().await;
    let id = Uuid::new_v4();

    let outcome = harness
        .orchestrator
        .run_batch(id, vec![Product::new("apple", "kg", 2.0)])
        .await;

    assert_eq!(outcome.state, BatchState::Completed);
    assert_eq!(outcome.processed, 1);

    let results = harness.results().await;
    assert_eq!(results.len(), 1);
    assert!(harness.dead_letters().await.is_empty());

    let message = &results[0];
    assert_eq!(message["calculation_id"], id.to_string());
    assert_eq!(message["calculated_percentage"], 1.0);

    let item = &message["process_calculations"][0];
    assert_eq!(item["name"], "apple");
    assert_eq!(item["process_name_found"], "apple production");
    assert_eq!(item["calculated"], true);
    assert_eq!(item["amount"], 2.0);
    assert_eq!(item["value"], 2.0 * IMPACT_PER_KG);
    assert_eq!(item["unit"], IMPACT_UNIT);
}

#[tokio::test]
async fn test_engine_lifecycle_order_and_disposal() {
    let harness = fuzzy_harness().await;

    harness
        .orchestrator
        .run_batch(Uuid::new_v4(), vec![Product::new("apple", "kg", 2.0)])
        .await;

    let state = harness.engine.state();
    assert_eq!(
        state.calls,
        vec![
            "create:proc-0".to_string(),
            format!("method:{DEFAULT_IMPACT_METHOD}"),
            "system:apple production".to_string(),
            "calculate:apple production".to_string(),
            "dispose:r-1".to_string(),
        ]
    );
    assert!(state.outstanding.is_empty());
    assert_eq!(state.setups[0].amount, 2.0);
}

#[tokio::test]
async fn test_unresolvable_product_is_published_uncalculated() {
    let harness = fuzzy_harness().await;

    let outcome = harness
        .orchestrator
        .run_batch(Uuid::new_v4(), vec![Product::new("unobtainium", "kg", 1.0)])
        .await;

    assert_eq!(outcome.state, BatchState::Completed);
    assert_eq!(outcome.calculated_percentage, 0.0);

    let results = harness.results().await;
    assert_eq!(results.len(), 1);
    assert!(harness.dead_letters().await.is_empty());

    let item = &results[0]["process_calculations"][0];
    assert_eq!(item["calculated"], false);
    assert!(item["value"].is_null());
    assert!(item["process_name_found"].is_null());
    assert_eq!(item["amount"], 1.0);
    assert_eq!(item["unit"], IMPACT_UNIT);
    assert_eq!(results[0]["calculated_percentage"], 0.0);
    assert_eq!(harness.engine.calculate_count(), 0);
}

#[tokio::test]
async fn test_short_unrelated_name_is_not_matched_to_production_process() {
    let harness = TestHarness::fuzzy(
        Arc::new(MockCatalog::with_names(&["apple production"])),
        MockImpactEngine::new(),
    )
    .await;

    let outcome = harness
        .orchestrator
        .run_batch(Uuid::new_v4(), vec![Product::new("kiwi", "kg", 1.0)])
        .await;

    assert_eq!(outcome.state, BatchState::Completed);
    let item = &harness.results().await[0]["process_calculations"][0];
    assert_eq!(item["name"], "kiwi");
    assert_eq!(item["calculated"], false);
    assert!(item["process_name_found"].is_null());
    assert_eq!(harness.engine.calculate_count(), 0);
}

#[tokio::test]
async fn test_undefined_unit_aborts_batch_to_dead_letter_queue() {
    let harness = fuzzy_harness().await;
    let id = Uuid::new_v4();

    let outcome = harness
        .orchestrator
        .run_batch(
            id,
            vec![
                Product::new("apple", "undefined", 1.0),
                Product::new("carrot", "kg", 1.0),
            ],
        )
        .await;

    assert_eq!(outcome.state, BatchState::Failed);
    assert_eq!(outcome.processed, 0);
    assert!(outcome.message_id.is_some());

    assert!(harness.results().await.is_empty());
    let dead_letters = harness.dead_letters().await;
    assert_eq!(dead_letters.len(), 1);
    assert_eq!(dead_letters[0]["calculation_id"], id.to_string());
    assert!(dead_letters[0]["error_message"]
        .as_str()
        .unwrap()
        .contains("undefined"));

    // The remaining product was never attempted
    assert_eq!(harness.engine.calculate_count(), 0);
    assert!(harness.engine.state().calls.is_empty());
}

#[tokio::test]
async fn test_fatal_error_after_calculated_items_discards_partial_result() {
    let harness = fuzzy_harness().await;

    let outcome = harness
        .orchestrator
        .run_batch(
            Uuid::new_v4(),
            vec![
                Product::new("apple", "kg", 1.0),
                Product::new("carrot", "undefined", 1.0),
                Product::new("apple", "kg", 3.0),
            ],
        )
        .await;

    assert_eq!(outcome.state, BatchState::Failed);
    assert_eq!(outcome.processed, 1);
    assert!(harness.results().await.is_empty());
    assert_eq!(harness.dead_letters().await.len(), 1);
    assert_eq!(harness.engine.calculate_count(), 1);
}

#[tokio::test]
async fn test_mixed_batch_tracks_percentage_in_input_order() {
    let harness = fuzzy_harness().await;

    let outcome = harness
        .orchestrator
        .run_batch(
            Uuid::new_v4(),
            vec![
                Product::new("unobtainium", "kg", 1.0),
                Product::new("apple", "kg", 1.0),
            ],
        )
        .await;

    assert_eq!(outcome.calculated_percentage, 0.5);

    let results = harness.results().await;
    let items = results[0]["process_calculations"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "unobtainium");
    assert_eq!(items[0]["calculated"], false);
    assert_eq!(items[1]["name"], "apple");
    assert_eq!(items[1]["calculated"], true);
    assert_eq!(results[0]["calculated_percentage"], 0.5);
}

#[tokio::test]
async fn test_engine_failure_is_recoverable_and_keeps_declared_amount() {
    let harness = TestHarness::fuzzy(
        Arc::new(MockCatalog::with_names(CATALOG)),
        MockImpactEngine::new().failing_for("apple production"),
    )
    .await;

    let outcome = harness
        .orchestrator
        .run_batch(
            Uuid::new_v4(),
            vec![
                Product::new("apple", "pounds", 3.0),
                Product::new("carrot", "kg", 1.0),
            ],
        )
        .await;

    assert_eq!(outcome.state, BatchState::Completed);
    assert_eq!(outcome.calculated_percentage, 0.5);

    let results = harness.results().await;
    let items = results[0]["process_calculations"].as_array().unwrap();
    assert_eq!(items[0]["calculated"], false);
    assert_eq!(items[0]["process_name_found"], "apple production");
    assert_eq!(items[0]["amount"], 3.0);
    assert!(items[0]["value"].is_null());
    assert_eq!(items[1]["calculated"], true);
}

#[tokio::test]
async fn test_units_are_converted_before_execution() {
    let harness = fuzzy_harness().await;

    harness
        .orchestrator
        .run_batch(
            Uuid::new_v4(),
            vec![
                Product::new("apple", "2 pounds", 2.0),
                Product::new("carrot", "grams", 500.0),
            ],
        )
        .await;

    let setups = harness.engine.state().setups;
    assert!((setups[0].amount - 0.908).abs() < 1e-9);
    assert!((setups[1].amount - 0.5).abs() < 1e-9);

    let results = harness.results().await;
    let items = results[0]["process_calculations"].as_array().unwrap();
    // Published amount is the declared one
    assert_eq!(items[1]["amount"], 500.0);
}

#[tokio::test]
async fn test_unknown_unit_is_logged_and_raw_amount_used() {
    let harness = fuzzy_harness().await;

    let outcome = harness
        .orchestrator
        .run_batch(Uuid::new_v4(), vec![Product::new("apple", "handful", 2.0)])
        .await;

    assert_eq!(outcome.state, BatchState::Completed);
    assert_eq!(outcome.calculated_percentage, 1.0);
    assert_eq!(harness.unknown_units.entries(), vec!["handful".to_string()]);
    assert_eq!(harness.engine.state().setups[0].amount, 2.0);
}

#[tokio::test]
async fn test_catalog_listing_fetched_once_per_batch() {
    let catalog = Arc::new(MockCatalog::with_names(CATALOG));
    let harness = TestHarness::fuzzy(catalog.clone(), MockImpactEngine::new()).await;

    harness
        .orchestrator
        .run_batch(
            Uuid::new_v4(),
            vec![
                Product::new("apple", "kg", 1.0),
                Product::new("carrot", "kg", 1.0),
                Product::new("unobtainium", "kg", 1.0),
            ],
        )
        .await;

    assert_eq!(catalog.list_calls(), 1);
}

#[tokio::test]
async fn test_catalog_failure_is_fatal() {
    let harness =
        TestHarness::fuzzy(Arc::new(MockCatalog::failing()), MockImpactEngine::new()).await;

    let outcome = harness
        .orchestrator
        .run_batch(Uuid::new_v4(), vec![Product::new("apple", "kg", 1.0)])
        .await;

    assert_eq!(outcome.state, BatchState::Failed);
    assert!(harness.results().await.is_empty());
    assert_eq!(harness.dead_letters().await.len(), 1);
}

#[tokio::test]
async fn test_every_calculation_is_disposed_before_the_next() {
    let harness = fuzzy_harness().await;

    harness
        .orchestrator
        .run_batch(
            Uuid::new_v4(),
            vec![
                Product::new("apple", "kg", 1.0),
                Product::new("carrot", "kg", 1.0),
                Product::new("apple", "g", 10.0),
            ],
        )
        .await;

    let state = harness.engine.state();
    assert_eq!(state.disposed, vec!["r-1", "r-2", "r-3"]);
    assert!(state.outstanding.is_empty());
}

#[tokio::test]
async fn test_index_strategy_uses_top_hit() {
    let index = Arc::new(
        MockSearchIndex::new()
            .with_hit("apple", "proc-9", "apple production, conventional")
            .with_hit("apple", "proc-10", "apple juice production"),
    );
    let harness = TestHarness::indexed(index.clone(), MockImpactEngine::new()).await;

    let outcome = harness
        .orchestrator
        .run_batch(
            Uuid::new_v4(),
            vec![
                Product::new("apple", "kg", 1.0),
                Product::new("unobtainium", "kg", 1.0),
            ],
        )
        .await;

    assert_eq!(outcome.calculated_percentage, 0.5);
    assert_eq!(index.queries(), vec!["apple", "unobtainium"]);

    let results = harness.results().await;
    let items = results[0]["process_calculations"].as_array().unwrap();
    assert_eq!(items[0]["process_name_found"], "apple production, conventional");
    assert_eq!(harness.engine.state().calls[0], "create:proc-9");
}

#[tokio::test]
async fn test_empty_batch_publishes_empty_result() {
    let harness = fuzzy_harness().await;

    let outcome = harness.orchestrator.run_batch(Uuid::new_v4(), vec![]).await;

    assert_eq!(outcome.state, BatchState::Completed);
    let results = harness.results().await;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["calculated_percentage"], 0.0);
    assert!(results[0]["process_calculations"]
        .as_array()
        .unwrap()
        .is_empty());
}
