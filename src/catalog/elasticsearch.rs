//! Elasticsearch-backed process index.
//!
//! Documents are `{ "id": ..., "name": ... }` records in a single index
//! (`processes` by default). Searches use a `match` query on `name` and return
//! hits in relevance order.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::errors::{CatalogError, CatalogResult};
use super::{SearchIndex, WritableIndex};
use crate::models::CatalogEntry;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: CatalogEntry,
}

/// Build the search request body for a product name
pub fn match_query(text: &str) -> serde_json::Value {
    json!({ "query": { "match": { "name": text } } })
}

/// Index mapping for process records
pub fn index_settings() -> serde_json::Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "text" },
                "name": { "type": "text" }
            }
        }
    })
}

#[derive(Debug, Clone)]
pub struct ElasticsearchIndex {
    client: Client,
    base_url: String,
    index_name: String,
}

impl ElasticsearchIndex {
    pub fn new(
        base_url: impl Into<String>,
        index_name: impl Into<String>,
        timeout: Duration,
    ) -> CatalogResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::transport("client_build", e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            index_name: index_name.into(),
        })
    }

    fn index_url(&self) -> String {
        format!("{}/{}", self.base_url, self.index_name)
    }

    /// Whether the cluster answers
    pub async fn ping(&self) -> bool {
        match self.client.head(&self.base_url).send().await {
            Ok(response) if response.status().is_success() => {
                info!(url = %self.base_url, "Elasticsearch connected");
                true
            }
            Ok(response) => {
                warn!(url = %self.base_url, status = %response.status(), "Elasticsearch ping failed");
                false
            }
            Err(e) => {
                warn!(url = %self.base_url, error = %e, "Could not connect to Elasticsearch");
                false
            }
        }
    }

    pub async fn delete_index(&self) -> CatalogResult<()> {
        let response = self.client.delete(self.index_url()).send().await?;
        if !response.status().is_success() && response.status() != StatusCode::NOT_FOUND {
            return Err(CatalogError::transport(
                "delete_index",
                format!("unexpected status {}", response.status()),
            ));
        }
        info!(index = %self.index_name, "Deleted index");
        Ok(())
    }
}

#[async_trait]
impl SearchIndex for ElasticsearchIndex {
    async fn search(&self, text: &str) -> CatalogResult<Vec<CatalogEntry>> {
        let url = format!("{}/_search", self.index_url());
        debug!(url = %url, text = %text, "Searching process index");

        let response = self.client.post(&url).json(&match_query(text)).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::transport(
                "search",
                format!("unexpected status {}", response.status()),
            ));
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.hits.hits.into_iter().map(|hit| hit.source).collect())
    }
}

#[async_trait]
impl WritableIndex for ElasticsearchIndex {
    async fn create_index(&self) -> CatalogResult<bool> {
        let exists = self.client.head(self.index_url()).send().await?;
        if exists.status().is_success() {
            debug!(index = %self.index_name, "Index already exists");
            return Ok(false);
        }

        let response = self
            .client
            .put(self.index_url())
            .json(&index_settings())
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CatalogError::transport(
                "create_index",
                format!("unexpected status {}", response.status()),
            ));
        }

        info!(index = %self.index_name, "Created index");
        Ok(true)
    }

    async fn store_record(&self, record: &CatalogEntry) -> CatalogResult<()> {
        let url = format!("{}/_doc", self.index_url());
        let response = self.client.post(&url).json(record).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::transport(
                "store_record",
                format!("unexpected status {} for {}", response.status(), record.id),
            ));
        }
        Ok(())
    }
}
