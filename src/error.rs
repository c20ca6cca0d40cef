//! Error types for estore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::model::ProductId;

/// Result type alias using EstoreError
pub type Result<T> = std::result::Result<T, EstoreError>;

/// Unified error type for estore operations
#[derive(Debug, Error)]
pub enum EstoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Storage Errors
    // -------------------------------------------------------------------------
    #[error("Products file corrupted: {0}")]
    Corruption(String),

    #[error("Product {0} already exists")]
    Conflict(ProductId),

    #[error("Product id space exhausted")]
    IdSpaceExhausted,

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Concurrency Errors
    // -------------------------------------------------------------------------
    #[error("Worker task failed: {0}")]
    Worker(String),
}
