//! # openLCA IPC Client
//!
//! JSON-RPC 2.0 over HTTP POST to an openLCA IPC server. Serves as both the
//! Impact Engine and the catalog listing collaborator, since the server knows
//! every process it can calculate.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

use super::{
    CalculationSetup, EngineError, EngineResult, EntityRef, ImpactEngine, ProcessType,
    ProviderLinking, SimpleResult,
};
use crate::catalog::{CatalogError, CatalogResult, ProcessCatalog};
use crate::models::CatalogEntry;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// Descriptor as returned by `get/descriptors`
#[derive(Debug, Clone, Deserialize)]
struct Descriptor {
    #[serde(rename = "@id")]
    id: String,
    #[serde(default)]
    name: String,
}

#[derive(Debug)]
pub struct OlcaIpcClient {
    client: Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl OlcaIpcClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> EngineResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn rpc<T: DeserializeOwned>(
        &self,
        method: &str,
        params: serde_json::Value,
    ) -> EngineResult<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };
        debug!(method = %method, id = request.id, "Sending IPC request");

        let response: RpcResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(EngineError::rpc(method, error.code, error.message));
        }

        let result = response.result.unwrap_or(serde_json::Value::Null);
        serde_json::from_value(result).map_err(|e| EngineError::invalid_response(method, e.to_string()))
    }

    async fn descriptors(&self, model_type: &str) -> EngineResult<Vec<Descriptor>> {
        self.rpc("get/descriptors", json!({ "@type": model_type }))
            .await
    }

    async fn find_by_name(&self, model_type: &str, name: &str) -> EngineResult<Option<EntityRef>> {
        Ok(self
            .descriptors(model_type)
            .await?
            .into_iter()
            .find(|descriptor| descriptor.name == name)
            .map(|descriptor| EntityRef::new(descriptor.id, descriptor.name)))
    }
}

#[async_trait]
impl ImpactEngine for OlcaIpcClient {
    async fn create_product_system(
        &self,
        process_id: &str,
        provider_linking: ProviderLinking,
        preferred_type: ProcessType,
    ) -> EngineResult<EntityRef> {
        self.rpc(
            "create/product_system",
            json!({
                "processId": process_id,
                "providerLinking": provider_linking,
                "preferredType": preferred_type,
            }),
        )
        .await
    }

    async fn find_impact_method(&self, name: &str) -> EngineResult<Option<EntityRef>> {
        self.find_by_name("ImpactMethod", name).await
    }

    async fn find_product_system(&self, name: &str) -> EngineResult<Option<EntityRef>> {
        self.find_by_name("ProductSystem", name).await
    }

    async fn calculate(&self, setup: &CalculationSetup) -> EngineResult<SimpleResult> {
        let mut params = serde_json::to_value(setup)
            .map_err(|e| EngineError::invalid_response("calculate", e.to_string()))?;
        params["@type"] = json!("CalculationSetup");
        self.rpc("calculate", params).await
    }

    async fn dispose(&self, result: &SimpleResult) -> EngineResult<()> {
        let _: serde_json::Value = self
            .rpc("dispose", json!({ "@type": "SimpleResult", "@id": result.id }))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ProcessCatalog for OlcaIpcClient {
    async fn list_all(&self) -> CatalogResult<Vec<CatalogEntry>> {
        let descriptors = self
            .descriptors("Process")
            .await
            .map_err(|e| CatalogError::transport("get/descriptors", e.to_string()))?;
        Ok(descriptors
            .into_iter()
            .map(|descriptor| CatalogEntry::new(descriptor.id, descriptor.name))
            .collect())
    }
}
