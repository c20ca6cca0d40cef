//! In-memory store
//!
//! Same semantics as the file store without a backing file. Used for
//! `--ephemeral` servers and as a test double for the HTTP layer.

use parking_lot::Mutex;

use super::table::ProductTable;
use super::InventoryStore;
use crate::error::Result;
use crate::model::{Product, ProductId};

#[derive(Default)]
pub struct MemoryStore {
    table: Mutex<ProductTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records
    pub fn with_products(products: Vec<Product>) -> Result<Self> {
        Ok(Self {
            table: Mutex::new(ProductTable::from_records(products)?),
        })
    }

    pub fn next_id(&self) -> ProductId {
        self.table.lock().next_id()
    }
}

impl InventoryStore for MemoryStore {
    fn create(&self, draft: &Product) -> Result<Product> {
        self.table.lock().insert_new(draft)
    }

    fn find(&self, text: Option<&str>) -> Result<Vec<Product>> {
        Ok(self.table.lock().find(text))
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.table.lock().get(id).cloned())
    }

    fn update(&self, product: &Product) -> Result<Option<Product>> {
        Ok(self
            .table
            .lock()
            .replace(product.clone())
            .map(|_| product.clone()))
    }

    fn delete(&self, id: ProductId) -> Result<bool> {
        Ok(self.table.lock().remove(id).is_some())
    }
}
