//! Work orders issued to production for inventory shortfalls.

use crate::model::{OrderId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductionOrderId(pub u32);

impl From<u32> for ProductionOrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductionOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "production_{}", self.0)
    }
}

impl ProductionOrderId {
    /// Human-facing number, e.g. `PO-000042`.
    pub fn order_number(&self) -> String {
        format!("PO-{:06}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductionStatus {
    Planned,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    pub id: ProductionOrderId,
    pub order_number: String,
    pub product_id: ProductId,
    pub quantity: u32,
    /// The customer order whose shortfall this covers.
    pub source_order: Option<OrderId>,
    pub due_date: DateTime<Utc>,
    pub status: ProductionStatus,
    pub created_at: DateTime<Utc>,
}

/// A request to manufacture `quantity` units of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrderCreate {
    pub product_id: ProductId,
    pub quantity: u32,
    pub source_order: Option<OrderId>,
    pub due_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrderUpdate {
    pub due_date: Option<DateTime<Utc>>,
}

/// What the issuer hands back for a created work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionOrderSummary {
    pub id: ProductionOrderId,
    pub order_number: String,
    pub product_id: ProductId,
    pub quantity: u32,
}

impl From<&ProductionOrder> for ProductionOrderSummary {
    fn from(order: &ProductionOrder) -> Self {
        Self {
            id: order.id.clone(),
            order_number: order.order_number.clone(),
            product_id: order.product_id.clone(),
            quantity: order.quantity,
        }
    }
}
