//! Storage Module
//!
//! Persistence for product records.
//!
//! ## Responsibilities
//! - Own the authoritative set of live products
//! - Assign ids (monotonic, never reused)
//! - Persist the full set on every mutation
//!
//! ## File Format
//! A single JSON array, rewritten whole on each create/update/delete:
//! ```text
//! [
//!   { "id": 0, "name": "Soda", "price": 2.99, "quantity": 20 },
//!   ...
//! ]
//! ```

mod file;
mod memory;
mod table;

pub use file::ProductFileStore;
pub use memory::MemoryStore;
pub(crate) use table::ProductTable;

use crate::error::Result;
use crate::model::{Product, ProductId};

/// Storage capability the HTTP layer depends on
///
/// Not-found is reported as a value (`None` / `false`); errors are reserved
/// for I/O, corruption and id conflicts.
pub trait InventoryStore: Send + Sync {
    /// Store `draft` under a newly assigned id, ignoring `draft.id`
    fn create(&self, draft: &Product) -> Result<Product>;

    /// All live products in id order
    fn get_all(&self) -> Result<Vec<Product>> {
        self.find(None)
    }

    /// Live products whose name contains `text` (case-sensitive), in id order
    fn find(&self, text: Option<&str>) -> Result<Vec<Product>>;

    fn get(&self, id: ProductId) -> Result<Option<Product>>;

    /// Replace the record with `product.id`; None if that id is not live
    fn update(&self, product: &Product) -> Result<Option<Product>>;

    /// Remove a record; false if the id is not live
    fn delete(&self, id: ProductId) -> Result<bool>;
}
