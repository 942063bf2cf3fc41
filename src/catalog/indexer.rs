//! Copies the catalog listing into the search index.

use tracing::{info, warn};

use super::errors::CatalogResult;
use super::{ProcessCatalog, WritableIndex};

#[derive(Debug, Default)]
pub struct CatalogIndexer;

impl CatalogIndexer {
    /// Store every listed process in the index; returns the number stored
    pub async fn sync(
        catalog: &dyn ProcessCatalog,
        index: &dyn WritableIndex,
    ) -> CatalogResult<usize> {
        if index.create_index().await? {
            info!("Created process index before sync");
        }

        let entries = catalog.list_all().await?;
        info!(process_count = entries.len(), "Indexing catalog processes");

        let mut stored = 0;
        for entry in &entries {
            match index.store_record(entry).await {
                Ok(()) => stored += 1,
                Err(e) => warn!(process_id = %entry.id, error = %e, "Error indexing process"),
            }
        }

        info!(stored = stored, total = entries.len(), "Catalog sync finished");
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::models::CatalogEntry;
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Debug)]
    struct Listing(Vec<CatalogEntry>);

    #[async_trait]
    impl ProcessCatalog for Listing {
        async fn list_all(&self) -> CatalogResult<Vec<CatalogEntry>> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingIndex {
        created: Mutex<bool>,
        records: Mutex<Vec<CatalogEntry>>,
    }

    #[async_trait]
    impl WritableIndex for RecordingIndex {
        async fn create_index(&self) -> CatalogResult<bool> {
            let mut created = self.created.lock();
            let was_missing = !*created;
            *created = true;
            Ok(was_missing)
        }

        async fn store_record(&self, record: &CatalogEntry) -> CatalogResult<()> {
            if record.id == "bad" {
                return Err(CatalogError::transport("store_record", "rejected"));
            }
            self.records.lock().push(record.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_sync_stores_all_records_and_skips_failures() {
        let catalog = Listing(vec![
            CatalogEntry::new("1", "apple production"),
            CatalogEntry::new("bad", "broken record"),
            CatalogEntry::new("2", "pear production"),
        ]);
        let index = RecordingIndex::default();

        let stored = CatalogIndexer::sync(&catalog, &index).await.unwrap();

        assert_eq!(stored, 2);
        assert!(*index.created.lock());
        assert_eq!(index.records.lock().len(), 2);
    }
}
