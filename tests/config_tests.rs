//! Shipped configuration files load and validate

use std::path::PathBuf;

use food_footprint::config::{
    ConfigManager, MessagingProviderKind, ResolutionStrategyKind, UnitMatchPolicy,
};

fn shipped_config_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config")
}

#[test]
fn test_base_and_test_environment_config_load() {
    let manager =
        ConfigManager::load_from_directory_with_env(Some(shipped_config_dir()), "test").unwrap();
    let config = manager.config();

    assert_eq!(manager.environment(), "test");
    assert_eq!(config.catalog.strategy, ResolutionStrategyKind::Fuzzy);
    assert_eq!(config.catalog.match_threshold, 60.0);
    assert_eq!(config.catalog.name_suffix.as_deref(), Some(" production"));
    assert_eq!(config.engine.impact_method, "IPCC 2013 GWP 100a");
    assert_eq!(config.engine.timeout_ms, 2000);
    assert_eq!(config.messaging.provider, MessagingProviderKind::InMemory);
    assert_eq!(config.units.policy, UnitMatchPolicy::Permissive);
}

#[test]
fn test_production_requires_database_url() {
    let result = ConfigManager::load_from_directory_with_env(Some(shipped_config_dir()), "production");
    assert!(result.is_err());
}
