//! # Footprint Error Taxonomy
//!
//! Domain-level errors for batch footprint calculation. Each variant carries
//! enough context to be serialized into a dead-letter `CalculationError`.
//!
//! Recoverable errors (`NotFound`, `Calculation`) are isolated to a single
//! product; everything else aborts the batch.

use thiserror::Error;

use crate::config::ConfigurationError;
use crate::messaging::MessagingError;

#[derive(Error, Debug)]
pub enum FootprintError {
    #[error("No catalog process matches product: {product}")]
    NotFound { product: String },

    #[error("Calculation failed for process {process}: {message}")]
    Calculation { process: String, message: String },

    #[error("Invalid unit: {unit}")]
    InvalidUnit { unit: String },

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Messaging(#[from] MessagingError),
}

impl FootprintError {
    /// Create a not-found error for a product name
    pub fn not_found(product: impl Into<String>) -> Self {
        Self::NotFound {
            product: product.into(),
        }
    }

    /// Create an engine-side calculation error
    pub fn calculation(process: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Calculation {
            process: process.into(),
            message: message.into(),
        }
    }

    /// Create a hard unit input error
    pub fn invalid_unit(unit: impl Into<String>) -> Self {
        Self::InvalidUnit { unit: unit.into() }
    }

    /// Create an unexpected (fatal) error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Whether the failure is isolated to one product and the batch may continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Calculation { .. })
    }

    /// Stable error code used in logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Calculation { .. } => "CALCULATION_ERROR",
            Self::InvalidUnit { .. } => "INVALID_UNIT",
            Self::Unexpected { .. } => "UNEXPECTED_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Messaging(_) => "MESSAGING_ERROR",
        }
    }
}

/// Result type alias for footprint operations
pub type FootprintResult<T> = Result<T, FootprintError>;
