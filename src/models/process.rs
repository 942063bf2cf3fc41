//! Catalog process references

use serde::{Deserialize, Serialize};

/// A process record as listed by a catalog collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The single catalog process chosen for a product.
///
/// Transient: produced by the resolver and consumed once by the executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProcess {
    /// Opaque catalog identifier
    pub id: String,
    pub name: String,
}

impl From<CatalogEntry> for ResolvedProcess {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: entry.id,
            name: entry.name,
        }
    }
}
