//! Product record
//!
//! The single entity kept by the store and exchanged over HTTP.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store on create
pub type ProductId = u64;

/// An inventory item
///
/// `id` is optional in request bodies (it defaults to 0). Create ignores it
/// and update uses it to select the record to replace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub quantity: i64,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            quantity,
        }
    }

    /// A product with no id yet, as passed to create
    pub fn draft(name: impl Into<String>, price: f64, quantity: i64) -> Self {
        Self::new(0, name, price, quantity)
    }

    /// Copy of this product carrying `id`
    pub fn with_id(&self, id: ProductId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }

    /// Case-sensitive substring match on the name. `None` matches everything.
    pub fn name_contains(&self, text: Option<&str>) -> bool {
        text.map_or(true, |t| self.name.contains(t))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Product [id={}, name={}, price={}, quantity={}]",
            self.id, self.name, self.price, self.quantity
        )
    }
}
