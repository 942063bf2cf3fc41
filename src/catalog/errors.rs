//! # Catalog Error Types

use thiserror::Error;

use crate::error::FootprintError;

/// Failures talking to a catalog collaborator (listing or search index)
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog transport error: {operation}: {message}")]
    Transport { operation: String, message: String },

    #[error("Invalid catalog response: {operation}: {message}")]
    InvalidResponse { operation: String, message: String },

    #[error("Catalog operation {operation} timed out after {timeout_ms}ms")]
    Timeout { operation: String, timeout_ms: u64 },
}

impl CatalogError {
    pub fn transport(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn invalid_response(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn timeout(operation: impl Into<String>, timeout_ms: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_ms,
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CatalogError::invalid_response("http", err.to_string())
        } else {
            CatalogError::transport("http", err.to_string())
        }
    }
}

/// A broken catalog is not a per-product condition; it aborts the batch
impl From<CatalogError> for FootprintError {
    fn from(err: CatalogError) -> Self {
        FootprintError::unexpected(err.to_string())
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
