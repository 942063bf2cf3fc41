//! # Process Catalog
//!
//! Collaborator contracts for the set of known production processes, and the
//! resolver that matches product names against them.
//!
//! - [`ProcessCatalog`] - full listing of `(id, name)` pairs
//! - [`SearchIndex`] - ranked full-text search over process names
//! - [`WritableIndex`] - index maintenance used by the catalog indexer

pub mod elasticsearch;
pub mod errors;
pub mod fuzzy;
pub mod indexer;
pub mod resolver;

use async_trait::async_trait;

use crate::models::CatalogEntry;

pub use elasticsearch::ElasticsearchIndex;
pub use errors::{CatalogError, CatalogResult};
pub use fuzzy::{similarity_score, FuzzyMatcher};
pub use indexer::CatalogIndexer;
pub use resolver::{BatchResolver, ProcessResolver, ResolutionStrategy};

/// Full listing of catalog processes
#[async_trait]
pub trait ProcessCatalog: Send + Sync + std::fmt::Debug {
    async fn list_all(&self) -> CatalogResult<Vec<CatalogEntry>>;
}

/// Ranked search over process names; best hit first
#[async_trait]
pub trait SearchIndex: Send + Sync + std::fmt::Debug {
    async fn search(&self, text: &str) -> CatalogResult<Vec<CatalogEntry>>;
}

/// Index maintenance operations
#[async_trait]
pub trait WritableIndex: Send + Sync {
    /// Create the index if missing; returns whether it was created
    async fn create_index(&self) -> CatalogResult<bool>;

    async fn store_record(&self, record: &CatalogEntry) -> CatalogResult<()>;
}
