//! # estore
//!
//! A small inventory backend with:
//! - Product CRUD and name search over HTTP
//! - A JSON flat file as the single-table datastore
//! - Store-assigned, never-reused ids
//! - Whole-file rewrite on every mutation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      HTTP Server                             │
//! │                 (axum, /inventory routes)                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                  InventoryStore trait                        │
//! │                 (single lock per store)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  FileStore  │          │ MemoryStore │
//!   │ (JSON file) │          │ (ephemeral) │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod model;
pub mod storage;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{EstoreError, Result};
pub use config::Config;
pub use model::{Product, ProductId};
pub use storage::{InventoryStore, MemoryStore, ProductFileStore};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of estore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
