//! # System Constants
//!
//! Fixed values shared by the orchestrator, the executor and the configuration
//! defaults.

/// Impact assessment method used when none is configured
pub const DEFAULT_IMPACT_METHOD: &str = "IPCC 2013 GWP 100a";

/// Unit label attached to every `ProcessCalculation`
pub const IMPACT_UNIT: &str = "kg CO2 eq";

/// Fuzzy match scores must strictly exceed this value (0-100 scale)
pub const DEFAULT_MATCH_THRESHOLD: f64 = 60.0;

/// Unit label that is rejected outright instead of being treated as unknown
pub const UNDEFINED_UNIT: &str = "undefined";

/// Default file receiving unit labels the normalizer could not classify
pub const DEFAULT_UNKNOWN_UNITS_LOG: &str = "not_found_units.log";

/// Queue names used by the result publisher
pub mod queues {
    pub const FOOD_CALCULATIONS: &str = "food_calculations";
    pub const FOOD_CALCULATIONS_DLQ: &str = "food_calculations_dlq";
}

/// Batch lifecycle events emitted through structured logging
pub mod events {
    pub const BATCH_ACCEPTED: &str = "batch.accepted";
    pub const BATCH_STARTED: &str = "batch.started";
    pub const BATCH_COMPLETED: &str = "batch.completed";
    pub const BATCH_FAILED: &str = "batch.failed";

    pub const ITEM_CALCULATED: &str = "item.calculated";
    pub const ITEM_SKIPPED: &str = "item.skipped";
    pub const ITEM_FATAL: &str = "item.fatal";
}

/// Default settings for the Impact Engine IPC collaborator
pub mod engine {
    /// openLCA IPC server default address
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8084";
    pub const DEFAULT_TIMEOUT_MS: u64 = 60_000;
}

/// Default settings for the catalog collaborators
pub mod catalog {
    pub const DEFAULT_INDEX_NAME: &str = "processes";
    pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
    /// Suffix the listing catalog uses for production processes
    pub const PRODUCTION_SUFFIX: &str = " production";
}
