//! ProductTable implementation
//!
//! BTreeMap keyed by id plus the next-id counter. Callers wrap it in a lock.

use std::collections::BTreeMap;

use crate::error::{EstoreError, Result};
use crate::model::{Product, ProductId};

/// Ordered set of live products and the id to hand out next
///
/// Invariant: `next_id` is strictly greater than every id ever inserted.
#[derive(Debug, Default, Clone)]
pub struct ProductTable {
    products: BTreeMap<ProductId, Product>,
    next_id: ProductId,
}

impl ProductTable {
    /// Create an empty table starting at id 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from persisted records
    ///
    /// `next_id` becomes one past the largest id seen, or 0 if there are no
    /// records. Two records sharing an id mean the file is corrupt.
    pub fn from_records(records: Vec<Product>) -> Result<Self> {
        let mut products = BTreeMap::new();

        for product in records {
            let id = product.id;
            if products.insert(id, product).is_some() {
                return Err(EstoreError::Corruption(format!("duplicate product id {}", id)));
            }
        }

        let next_id = match products.keys().next_back() {
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| EstoreError::Corruption("id space exhausted".to_string()))?,
            None => 0,
        };

        Ok(Self { products, next_id })
    }

    pub fn next_id(&self) -> ProductId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// Live products in id order
    pub fn records(&self) -> Vec<&Product> {
        self.products.values().collect()
    }

    /// Linear scan for names containing `text`, in id order
    pub fn find(&self, text: Option<&str>) -> Vec<Product> {
        self.products
            .values()
            .filter(|p| p.name_contains(text))
            .cloned()
            .collect()
    }

    /// Insert `draft` under a freshly assigned id and advance the counter
    ///
    /// Fails without touching the table once the counter cannot move past
    /// the id it would hand out.
    pub fn insert_new(&mut self, draft: &Product) -> Result<Product> {
        let id = self.next_id;
        if self.products.contains_key(&id) {
            return Err(EstoreError::Conflict(id));
        }
        let next_id = id.checked_add(1).ok_or(EstoreError::IdSpaceExhausted)?;

        let product = draft.with_id(id);
        self.products.insert(id, product.clone());
        self.next_id = next_id;

        Ok(product)
    }

    /// Undo an `insert_new` whose write never reached disk
    ///
    /// Only valid for the most recent insert, so the counter goes back to
    /// the id that was handed out.
    pub fn revert_insert(&mut self, id: ProductId) {
        self.products.remove(&id);
        if self.next_id.checked_sub(1) == Some(id) {
            self.next_id = id;
        }
    }

    /// Replace a live record wholesale, returning the previous version
    ///
    /// Returns None and leaves the table untouched if the id is not live.
    pub fn replace(&mut self, product: Product) -> Option<Product> {
        match self.products.get_mut(&product.id) {
            Some(slot) => Some(std::mem::replace(slot, product)),
            None => None,
        }
    }

    /// Remove a live record
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        self.products.remove(&id)
    }

    /// Put back a record taken out by `replace` or `remove`
    pub fn restore(&mut self, product: Product) {
        self.products.insert(product.id, product);
    }
}
