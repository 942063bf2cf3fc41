//! # Process Resolver
//!
//! Maps a free-text product name to exactly one catalog process.
//!
//! Two strategies are supported:
//!
//! - **Index search**: query a full-text index and trust its ranking; the top
//!   hit wins and an empty result is `NotFound`.
//! - **Fuzzy listing**: score the product name against a full catalog listing
//!   fetched once per batch, with the configured suffix (`" production"`)
//!   removed from catalog names; the best candidate wins if it strictly
//!   exceeds the configured threshold.
//!
//! ```text
//! ProcessResolver::prepare() ──▶ BatchResolver ──resolve(name)──▶ ResolvedProcess | NotFound
//!        (once per batch)            (per product)
//! ```

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::errors::CatalogError;
use super::fuzzy::FuzzyMatcher;
use super::{ProcessCatalog, SearchIndex};
use crate::error::{FootprintError, FootprintResult};
use crate::models::{CatalogEntry, ResolvedProcess};

/// Configured resolution strategy with its collaborator handle
#[derive(Debug, Clone)]
pub enum ResolutionStrategy {
    IndexSearch {
        index: Arc<dyn SearchIndex>,
    },
    FuzzyListing {
        catalog: Arc<dyn ProcessCatalog>,
        matcher: FuzzyMatcher,
        name_suffix: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct ProcessResolver {
    strategy: ResolutionStrategy,
    timeout: Duration,
}

impl ProcessResolver {
    pub fn new(strategy: ResolutionStrategy, timeout: Duration) -> Self {
        Self { strategy, timeout }
    }

    pub fn strategy_name(&self) -> &'static str {
        match self.strategy {
            ResolutionStrategy::IndexSearch { .. } => "index_search",
            ResolutionStrategy::FuzzyListing { .. } => "fuzzy_listing",
        }
    }

    /// Build the per-batch resolver, fetching the catalog listing when the
    /// fuzzy strategy is in use. A failed listing fails the whole batch.
    pub async fn prepare(&self) -> FootprintResult<BatchResolver> {
        match &self.strategy {
            ResolutionStrategy::IndexSearch { index } => Ok(BatchResolver::Index {
                index: Arc::clone(index),
                timeout: self.timeout,
            }),
            ResolutionStrategy::FuzzyListing {
                catalog,
                matcher,
                name_suffix,
            } => {
                info!("Searching all processes in the catalog");
                let entries = tokio::time::timeout(self.timeout, catalog.list_all())
                    .await
                    .map_err(|_| {
                        CatalogError::timeout("list_all", self.timeout.as_millis() as u64)
                    })??;
                info!(process_count = entries.len(), "Catalog listing fetched");

                Ok(BatchResolver::Listing {
                    entries,
                    matcher: *matcher,
                    name_suffix: name_suffix.clone(),
                })
            }
        }
    }
}

/// Resolver bound to one batch
#[derive(Debug)]
pub enum BatchResolver {
    Index {
        index: Arc<dyn SearchIndex>,
        timeout: Duration,
    },
    Listing {
        entries: Vec<CatalogEntry>,
        matcher: FuzzyMatcher,
        name_suffix: Option<String>,
    },
}

impl BatchResolver {
    /// Resolve a product name to its catalog process
    pub async fn resolve(&self, product_name: &str) -> FootprintResult<ResolvedProcess> {
        debug!(product = %product_name, "Looking for lifecycle processes for the product");

        match self {
            Self::Index { index, timeout } => {
                let hits = tokio::time::timeout(*timeout, index.search(product_name))
                    .await
                    .map_err(|_| CatalogError::timeout("search", timeout.as_millis() as u64))??;

                info!(
                    product = %product_name,
                    hit_count = hits.len(),
                    "Index search completed"
                );

                hits.into_iter()
                    .next()
                    .map(ResolvedProcess::from)
                    .ok_or_else(|| FootprintError::not_found(product_name))
            }
            Self::Listing {
                entries,
                matcher,
                name_suffix,
            } => {
                let matched = match name_suffix {
                    Some(suffix) => matcher.find_match_stripped(product_name, entries, suffix),
                    None => matcher.find_match(product_name, entries),
                };

                match matched {
                    Some((entry, score)) => {
                        info!(
                            product = %product_name,
                            process = %entry.name,
                            score = score,
                            "Catalog process matched"
                        );
                        Ok(ResolvedProcess::from(entry.clone()))
                    }
                    None => {
                        info!(
                            product = %product_name,
                            threshold = matcher.threshold(),
                            "No catalog process above threshold"
                        );
                        Err(FootprintError::not_found(product_name))
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::errors::CatalogResult;
    use async_trait::async_trait;

    #[derive(Debug)]
    struct StaticCatalog(Vec<CatalogEntry>);

    #[async_trait]
    impl ProcessCatalog for StaticCatalog {
        async fn list_all(&self) -> CatalogResult<Vec<CatalogEntry>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct StaticIndex(Vec<CatalogEntry>);

    #[async_trait]
    impl SearchIndex for StaticIndex {
        async fn search(&self, text: &str) -> CatalogResult<Vec<CatalogEntry>> {
            Ok(self
                .0
                .iter()
                .filter(|entry| entry.name.contains(text))
                .cloned()
                .collect())
        }
    }

    #[derive(Debug)]
    struct BrokenIndex;

    #[async_trait]
    impl SearchIndex for BrokenIndex {
        async fn search(&self, _text: &str) -> CatalogResult<Vec<CatalogEntry>> {
            Err(CatalogError::transport("search", "connection refused"))
        }
    }

    fn fuzzy_resolver(names: &[&str], suffix: Option<&str>) -> ProcessResolver {
        let entries = names
            .iter()
            .enumerate()
            .map(|(i, name)| CatalogEntry::new(format!("p-{i}"), *name))
            .collect();
        ProcessResolver::new(
            ResolutionStrategy::FuzzyListing {
                catalog: Arc::new(StaticCatalog(entries)),
                matcher: FuzzyMatcher::new(60.0),
                name_suffix: suffix.map(str::to_string),
            },
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn test_fuzzy_with_suffix_matches_production_process() {
        let resolver = fuzzy_resolver(&["pear production", "apple production"], Some(" production"));
        let batch = resolver.prepare().await.unwrap();

        let process = batch.resolve("apple").await.unwrap();
        assert_eq!(process.id, "p-1");
        assert_eq!(process.name, "apple production");
    }

    #[tokio::test]
    async fn test_fuzzy_below_threshold_is_not_found() {
        let resolver = fuzzy_resolver(&["apple production"], Some(" production"));
        let batch = resolver.prepare().await.unwrap();

        let err = batch.resolve("unobtainium").await.unwrap_err();
        assert!(matches!(err, FootprintError::NotFound { .. }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_fuzzy_short_unrelated_name_is_not_found() {
        let resolver = fuzzy_resolver(&["apple production"], Some(" production"));
        let batch = resolver.prepare().await.unwrap();

        let err = batch.resolve("kiwi").await.unwrap_err();
        assert!(matches!(err, FootprintError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_fuzzy_without_suffix_matches_raw_listing() {
        let resolver = fuzzy_resolver(&["Apple", "Apricot"], None);
        let batch = resolver.prepare().await.unwrap();

        assert_eq!(batch.resolve("apple").await.unwrap().id, "p-0");
    }

    #[tokio::test]
    async fn test_index_takes_top_hit() {
        let resolver = ProcessResolver::new(
            ResolutionStrategy::IndexSearch {
                index: Arc::new(StaticIndex(vec![
                    CatalogEntry::new("a", "apple production"),
                    CatalogEntry::new("b", "apple juice production"),
                ])),
            },
            Duration::from_secs(1),
        );
        let batch = resolver.prepare().await.unwrap();

        assert_eq!(batch.resolve("apple").await.unwrap().id, "a");
        assert!(matches!(
            batch.resolve("kiwi").await.unwrap_err(),
            FootprintError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_index_failure_is_fatal() {
        let resolver = ProcessResolver::new(
            ResolutionStrategy::IndexSearch {
                index: Arc::new(BrokenIndex),
            },
            Duration::from_secs(1),
        );
        let batch = resolver.prepare().await.unwrap();

        let err = batch.resolve("apple").await.unwrap_err();
        assert!(matches!(err, FootprintError::Unexpected { .. }));
        assert!(!err.is_recoverable());
    }
}
