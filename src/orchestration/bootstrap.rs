//! # Orchestration Bootstrap
//!
//! Builds the collaborators named in the configuration and starts the batch
//! worker. Used by the server binary; tests assemble `BatchOrchestrator`
//! directly from mocks.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

use super::batch_orchestrator::BatchOrchestrator;
use super::scheduler::BatchScheduler;
use crate::catalog::{ElasticsearchIndex, FuzzyMatcher, ProcessResolver, ResolutionStrategy};
use crate::config::{
    ConfigManager, ConfigurationError, FootprintConfig, MessagingProviderKind,
    ResolutionStrategyKind,
};
use crate::conversion::{FileUnknownUnitLog, UnitNormalizer};
use crate::engine::{CalculationExecutor, OlcaIpcClient};
use crate::error::{FootprintError, FootprintResult};
use crate::messaging::providers::{InMemoryMessagingService, PgmqMessagingService};
use crate::messaging::{MessagingProvider, ResultPublisher};

/// Running orchestration system
#[derive(Debug)]
pub struct OrchestrationSystemHandle {
    pub config_manager: Arc<ConfigManager>,
    pub orchestrator: Arc<BatchOrchestrator>,
    pub scheduler: BatchScheduler,
    pub worker: JoinHandle<()>,
}

impl OrchestrationSystemHandle {
    /// Build every collaborator from `config_manager` and start the worker
    pub async fn bootstrap(config_manager: Arc<ConfigManager>) -> FootprintResult<Self> {
        let config = config_manager.config();
        config.validate()?;

        info!(
            environment = %config_manager.environment(),
            "Bootstrapping orchestration system"
        );

        let orchestrator = Arc::new(build_orchestrator(config).await?);
        let (scheduler, worker) = BatchScheduler::spawn(
            Arc::clone(&orchestrator),
            config.orchestration.batch_channel_capacity,
        );

        info!("Orchestration system started");
        Ok(Self {
            config_manager,
            orchestrator,
            scheduler,
            worker,
        })
    }
}

/// Assemble a `BatchOrchestrator` wired to the configured collaborators
pub async fn build_orchestrator(config: &FootprintConfig) -> FootprintResult<BatchOrchestrator> {
    let engine = Arc::new(
        OlcaIpcClient::new(config.engine.base_url.clone(), config.engine.timeout()).map_err(
            |e| FootprintError::unexpected(format!("failed to build engine client: {e}")),
        )?,
    );

    let strategy = match config.catalog.strategy {
        ResolutionStrategyKind::Index => {
            let index_url = config.catalog.index_url.clone().ok_or_else(|| {
                ConfigurationError::missing_required_field("index_url", "catalog")
            })?;
            ResolutionStrategy::IndexSearch {
                index: Arc::new(ElasticsearchIndex::new(
                    index_url,
                    config.catalog.index_name.clone(),
                    config.catalog.timeout(),
                )?),
            }
        }
        ResolutionStrategyKind::Fuzzy => ResolutionStrategy::FuzzyListing {
            catalog: engine.clone(),
            matcher: FuzzyMatcher::new(config.catalog.match_threshold),
            name_suffix: config.catalog.name_suffix.clone(),
        },
    };
    let resolver = ProcessResolver::new(strategy, config.catalog.timeout());
    info!(strategy = resolver.strategy_name(), "Process resolver configured");

    let normalizer = UnitNormalizer::new(
        config.units.policy,
        Arc::new(FileUnknownUnitLog::new(&config.units.unknown_units_log)),
    );

    let executor = CalculationExecutor::new(
        engine,
        config.engine.impact_method.clone(),
        config.engine.timeout(),
    );

    let provider = match config.messaging.provider {
        MessagingProviderKind::InMemory => {
            MessagingProvider::InMemory(InMemoryMessagingService::new())
        }
        MessagingProviderKind::Pgmq => {
            let database_url = config.messaging.database_url.as_deref().ok_or_else(|| {
                ConfigurationError::missing_required_field("database_url", "messaging")
            })?;
            MessagingProvider::Pgmq(PgmqMessagingService::new(database_url).await?)
        }
    };
    let publisher = ResultPublisher::from_config(Arc::new(provider), &config.messaging);
    publisher.ensure_queues().await?;
    info!(
        provider = publisher.provider().provider_name(),
        result_queue = %publisher.result_queue(),
        dead_letter_queue = %publisher.dead_letter_queue(),
        "Message sinks ready"
    );

    Ok(BatchOrchestrator::new(resolver, normalizer, executor, publisher))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_orchestrator_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FootprintConfig::default();
        config.units.unknown_units_log = dir
            .path()
            .join("units.log")
            .to_string_lossy()
            .into_owned();

        let orchestrator = build_orchestrator(&config).await.unwrap();
        let publisher = orchestrator.publisher();
        assert_eq!(publisher.provider().provider_name(), "in_memory");

        let memory = publisher.provider().as_in_memory().unwrap();
        assert_eq!(memory.queue_length(&config.messaging.result_queue).await, 0);
        assert_eq!(memory.queue_length(&config.messaging.dead_letter_queue).await, 0);
    }

    #[tokio::test]
    async fn test_index_strategy_requires_url() {
        let mut config = FootprintConfig::default();
        config.catalog.strategy = ResolutionStrategyKind::Index;
        config.catalog.index_url = None;

        let err = build_orchestrator(&config).await.unwrap_err();
        assert!(matches!(err, FootprintError::Configuration(_)));
    }
}
