//! Merges order and tracking state into the single status shown to people.
//!
//! Nothing here is stored; every read path projects afresh.

use crate::model::{DeliveryTracking, Order, OrderStatus, PreparationStatus, ShippingStatus};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayStatus {
    Pending,
    Confirmed,
    InProgress,
    ReadyToShip,
    Shipped,
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
    Exception,
    Returned,
    OnHold,
    Cancelled,
}

impl DisplayStatus {
    pub fn label(self) -> &'static str {
        match self {
            DisplayStatus::Pending => "Pending",
            DisplayStatus::Confirmed => "Confirmed",
            DisplayStatus::InProgress => "In Progress",
            DisplayStatus::ReadyToShip => "Ready to Ship",
            DisplayStatus::Shipped => "Shipped",
            DisplayStatus::PickedUp => "Picked Up",
            DisplayStatus::InTransit => "In Transit",
            DisplayStatus::OutForDelivery => "Out for Delivery",
            DisplayStatus::Delivered => "Delivered",
            DisplayStatus::Exception => "Delivery Exception",
            DisplayStatus::Returned => "Returned",
            DisplayStatus::OnHold => "On Hold",
            DisplayStatus::Cancelled => "Cancelled",
        }
    }

    /// Position on the five-step customer timeline. On Hold and Cancelled
    /// are off the timeline.
    pub fn timeline_stage(self) -> Option<u8> {
        match self {
            DisplayStatus::Pending => Some(0),
            DisplayStatus::Confirmed => Some(1),
            DisplayStatus::InProgress | DisplayStatus::ReadyToShip => Some(2),
            DisplayStatus::Shipped
            | DisplayStatus::PickedUp
            | DisplayStatus::InTransit
            | DisplayStatus::OutForDelivery
            | DisplayStatus::Exception
            | DisplayStatus::Returned => Some(3),
            DisplayStatus::Delivered => Some(4),
            DisplayStatus::OnHold | DisplayStatus::Cancelled => None,
        }
    }
}

impl Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Tracking wins as soon as it has moved past Preparing.
pub fn display_status(order: &Order, tracking: Option<&DeliveryTracking>) -> DisplayStatus {
    if let Some(tracking) = tracking {
        match tracking.shipping_status {
            ShippingStatus::Preparing => {}
            ShippingStatus::PickedUp => return DisplayStatus::PickedUp,
            ShippingStatus::InTransit => return DisplayStatus::InTransit,
            ShippingStatus::OutForDelivery => return DisplayStatus::OutForDelivery,
            ShippingStatus::Delivered => return DisplayStatus::Delivered,
            ShippingStatus::Exception => return DisplayStatus::Exception,
            ShippingStatus::Returned => return DisplayStatus::Returned,
        }
    }

    match (order.status, order.preparation_status) {
        (OrderStatus::Pending, _) => DisplayStatus::Pending,
        (OrderStatus::Confirmed, PreparationStatus::NotStarted) => DisplayStatus::Confirmed,
        (OrderStatus::Confirmed, PreparationStatus::InProgress) => DisplayStatus::InProgress,
        (OrderStatus::Confirmed, PreparationStatus::ReadyToShip) => DisplayStatus::ReadyToShip,
        (OrderStatus::OnHold, _) => DisplayStatus::OnHold,
        (OrderStatus::Shipped, _) => DisplayStatus::Shipped,
        (OrderStatus::Delivered, _) => DisplayStatus::Delivered,
        (OrderStatus::Cancelled, _) => DisplayStatus::Cancelled,
    }
}
