//! A stocked product as the inventory ledger sees it.
//!
//! # Actor Framework
//! [`Product`] is managed by the product actor; see
//! [`product_actor`](crate::product_actor) for the stock actions.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Units on hand.
    pub stock: u32,
    /// Whether production can build this product.
    pub has_recipe: bool,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, stock: u32, has_recipe: bool) -> Self {
        Self {
            id,
            name: name.into(),
            stock,
            has_recipe,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub stock: u32,
    pub has_recipe: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub has_recipe: Option<bool>,
}
