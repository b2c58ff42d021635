//! # Preparation
//!
//! Inventory reconciliation for an order about to be prepared: how much of
//! each line item is on hand, what is missing, and which production orders
//! were issued to cover the gap.
//!
//! The two collaborators are reached through traits so the order actor can be
//! wired to the in-process actors, to test doubles, or to something remote:
//!
//! - [`InventoryLedger`]: available quantity per product
//! - [`ProductionOrderIssuer`]: creates a work order, or reports `NoRecipe`
//!
//! [`PreparationCoordinator`] holds the algorithm.

mod coordinator;

pub use coordinator::PreparationCoordinator;

use crate::model::{ProductId, ProductionOrderCreate, ProductionOrderSummary};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LedgerError {
    #[error("Inventory ledger unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum IssuerError {
    /// Production can't build this product.
    #[error("No buildable recipe for {0}")]
    NoRecipe(ProductId),

    #[error("Production order issuer unavailable: {0}")]
    Unavailable(String),
}

/// Source of available quantities.
#[async_trait]
pub trait InventoryLedger: Send + Sync {
    async fn available_quantity(&self, product: &ProductId) -> Result<u32, LedgerError>;
}

/// Sink for production requests.
#[async_trait]
pub trait ProductionOrderIssuer: Send + Sync {
    async fn create_production_order(
        &self,
        request: ProductionOrderCreate,
    ) -> Result<ProductionOrderSummary, IssuerError>;
}

/// Inventory check result for one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryCheck {
    pub product_id: ProductId,
    pub required: u32,
    pub available: u32,
    /// `max(0, required - available)`
    pub missing: u32,
}

impl InventoryCheck {
    pub fn new(product_id: ProductId, required: u32, available: u32) -> Self {
        Self {
            product_id,
            required,
            available,
            missing: required.saturating_sub(available),
        }
    }

    pub fn is_short(&self) -> bool {
        self.missing > 0
    }
}

/// A short item production couldn't cover, and why.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedShortfall {
    pub check: InventoryCheck,
    pub reason: IssuerError,
}

/// Outcome of issuing production orders for every short item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortfallReport {
    pub checks: Vec<InventoryCheck>,
    pub created: Vec<ProductionOrderSummary>,
    pub skipped: Vec<SkippedShortfall>,
}

impl ShortfallReport {
    pub fn short_items(&self) -> impl Iterator<Item = &InventoryCheck> {
        self.checks.iter().filter(|check| check.is_short())
    }
}

/// Outcome of a successful `prepare`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreparationReport {
    pub checks: Vec<InventoryCheck>,
    pub production_orders: Vec<ProductionOrderSummary>,
}

/// Why the coordinator refused to let preparation start.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PreparationError {
    /// Itemized over every short item, not only the uncovered ones.
    #[error("Insufficient inventory for {} item(s)", .0.len())]
    InsufficientInventory(Vec<InventoryCheck>),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Production order issuer unavailable: {0}")]
    IssuerUnavailable(String),
}
