//! # Footprint Configuration System
//!
//! Layered configuration: built-in defaults, then `config/food-footprint.toml`,
//! then an optional per-environment override file, then `FOOTPRINT__*`
//! environment variables.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use food_footprint::config::ConfigManager;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manager = ConfigManager::load()?;
//!
//! let engine_url = &manager.config().engine.base_url;
//! let threshold = manager.config().catalog.match_threshold;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod loader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants;

pub use error::{ConfigResult, ConfigurationError};
pub use loader::ConfigManager;

/// Root configuration structure mirroring food-footprint.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FootprintConfig {
    /// HTTP front door settings
    pub web: WebConfig,

    /// Impact Engine collaborator settings
    pub engine: EngineConfig,

    /// Process catalog and resolution settings
    pub catalog: CatalogConfig,

    /// Result and dead-letter sinks
    pub messaging: MessagingConfig,

    /// Unit normalization settings
    pub units: UnitsConfig,

    /// Background batch execution settings
    pub orchestration: OrchestrationConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    pub bind_address: String,
    pub request_timeout_ms: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    pub base_url: String,
    pub impact_method: String,
    pub timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: constants::engine::DEFAULT_BASE_URL.to_string(),
            impact_method: constants::DEFAULT_IMPACT_METHOD.to_string(),
            timeout_ms: constants::engine::DEFAULT_TIMEOUT_MS,
        }
    }
}

impl EngineConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// How product names are matched against the process catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionStrategyKind {
    /// Full-text search index, top hit wins
    Index,
    /// Fuzzy scoring against the full catalog listing
    Fuzzy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub strategy: ResolutionStrategyKind,
    pub index_url: Option<String>,
    pub index_name: String,
    /// Appended to product names before fuzzy matching (e.g. " production")
    pub name_suffix: Option<String>,
    pub match_threshold: f64,
    pub timeout_ms: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            strategy: ResolutionStrategyKind::Fuzzy,
            index_url: None,
            index_name: constants::catalog::DEFAULT_INDEX_NAME.to_string(),
            name_suffix: Some(constants::catalog::PRODUCTION_SUFFIX.to_string()),
            match_threshold: constants::DEFAULT_MATCH_THRESHOLD,
            timeout_ms: constants::catalog::DEFAULT_TIMEOUT_MS,
        }
    }
}

impl CatalogConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagingProviderKind {
    InMemory,
    Pgmq,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MessagingConfig {
    pub provider: MessagingProviderKind,
    pub database_url: Option<String>,
    pub result_queue: String,
    pub dead_letter_queue: String,
    pub timeout_ms: u64,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            provider: MessagingProviderKind::InMemory,
            database_url: None,
            result_queue: constants::queues::FOOD_CALCULATIONS.to_string(),
            dead_letter_queue: constants::queues::FOOD_CALCULATIONS_DLQ.to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl MessagingConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Unit label matching policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitMatchPolicy {
    /// Whole label must equal a known alias
    Exact,
    /// Any word of the label may equal a known alias ("2 ounces, sliced")
    #[default]
    Permissive,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UnitsConfig {
    pub policy: UnitMatchPolicy,
    pub unknown_units_log: String,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            policy: UnitMatchPolicy::default(),
            unknown_units_log: constants::DEFAULT_UNKNOWN_UNITS_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OrchestrationConfig {
    pub batch_channel_capacity: usize,
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            batch_channel_capacity: 64,
        }
    }
}

impl FootprintConfig {
    /// Validate the loaded configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.web.bind_address.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "bind_address",
                "web",
            ));
        }

        if self.engine.base_url.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "base_url", "engine",
            ));
        }

        if self.engine.impact_method.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "impact_method",
                "engine",
            ));
        }

        if !(0.0..=100.0).contains(&self.catalog.match_threshold) {
            return Err(ConfigurationError::invalid_value(
                "catalog.match_threshold",
                self.catalog.match_threshold.to_string(),
                "must be between 0 and 100",
            ));
        }

        if self.catalog.strategy == ResolutionStrategyKind::Index
            && self
                .catalog
                .index_url
                .as_deref()
                .map_or(true, |url| url.trim().is_empty())
        {
            return Err(ConfigurationError::missing_required_field(
                "index_url",
                "catalog (index strategy)",
            ));
        }

        for (field, value) in [
            ("web.request_timeout_ms", self.web.request_timeout_ms),
            ("engine.timeout_ms", self.engine.timeout_ms),
            ("catalog.timeout_ms", self.catalog.timeout_ms),
            ("messaging.timeout_ms", self.messaging.timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigurationError::invalid_value(
                    field,
                    "0",
                    "timeouts must be greater than zero",
                ));
            }
        }

        if self.messaging.result_queue.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "result_queue",
                "messaging",
            ));
        }

        if self.messaging.dead_letter_queue.trim().is_empty() {
            return Err(ConfigurationError::missing_required_field(
                "dead_letter_queue",
                "messaging",
            ));
        }

        if self.messaging.provider == MessagingProviderKind::Pgmq
            && self
                .messaging
                .database_url
                .as_deref()
                .map_or(true, |url| url.trim().is_empty())
        {
            return Err(ConfigurationError::missing_required_field(
                "database_url",
                "messaging (pgmq provider)",
            ));
        }

        if self.orchestration.batch_channel_capacity == 0 {
            return Err(ConfigurationError::invalid_value(
                "orchestration.batch_channel_capacity",
                "0",
                "channel capacity must be greater than zero",
            ));
        }

        Ok(())
    }
}
