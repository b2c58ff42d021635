//! Customer orders.
//!
//! # Actor Framework
//! [`Order`] implements [`ActorEntity`](actor_framework::ActorEntity) in
//! [`order_actor`](crate::order_actor), which holds the transition rules.
//! This module only carries the data and a few read helpers.

use crate::model::{DeliveryAddress, ProductId, TrackingId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// The acting back-office user, as supplied by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperatorId(pub String);

impl OperatorId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for OperatorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    OnHold,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Delivered and Cancelled orders accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PreparationStatus {
    #[default]
    NotStarted,
    InProgress,
    ReadyToShip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(product_id: ProductId, quantity: u32, unit_price: f64) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
        }
    }
}

/// One use of the manual override path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusOverride {
    pub from: OrderStatus,
    pub to: OrderStatus,
    pub operator: OperatorId,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// Opaque reference into the CRM collaborator.
    pub customer: String,
    pub items: Vec<LineItem>,
    pub status: OrderStatus,
    pub preparation_status: PreparationStatus,
    pub shipping_address: Option<DeliveryAddress>,
    pub requested_delivery_date: Option<DateTime<Utc>>,
    pub tracking_id: Option<TrackingId>,

    pub created_at: DateTime<Utc>,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub confirmed_by: Option<OperatorId>,
    pub preparation_started_at: Option<DateTime<Utc>>,
    pub ready_to_ship_at: Option<DateTime<Utc>>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub delivered_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,

    /// Audit log of manual status overrides, oldest first.
    pub overrides: Vec<StatusOverride>,
}

impl Order {
    /// A freshly placed order: Pending, preparation not started.
    pub fn new(id: OrderId, params: OrderCreate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            customer: params.customer,
            items: params.items,
            status: OrderStatus::Pending,
            preparation_status: PreparationStatus::NotStarted,
            shipping_address: params.shipping_address,
            requested_delivery_date: params.requested_delivery_date,
            tracking_id: None,
            created_at: now,
            confirmed_at: None,
            confirmed_by: None,
            preparation_started_at: None,
            ready_to_ship_at: None,
            shipped_at: None,
            delivered_at: None,
            cancelled_at: None,
            overrides: Vec::new(),
        }
    }

    /// Σ quantity × unit price over the line items.
    pub fn subtotal(&self) -> f64 {
        self.items
            .iter()
            .map(|item| f64::from(item.quantity) * item.unit_price)
            .sum()
    }
}

/// Payload for placing a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub customer: String,
    pub items: Vec<LineItem>,
    pub shipping_address: Option<DeliveryAddress>,
    pub requested_delivery_date: Option<DateTime<Utc>>,
}

/// Edits to the delivery details of an order that hasn't shipped yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub shipping_address: Option<DeliveryAddress>,
    pub requested_delivery_date: Option<DateTime<Utc>>,
}
