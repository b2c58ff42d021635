//! Custom actions for the Order actor.
//!
//! Guarded pipeline commands each check their own precondition.
//! [`OrderAction::SetStatus`] is the one escape hatch; it is audited on the
//! order and logged.

use crate::model::{
    DeliveryTracking, OperatorId, Order, OrderStatus, ScanReference, ShippingDetails,
    ShippingStatus, TrackingId,
};
use crate::preparation::{PreparationReport, ShortfallReport};

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Pending → Confirmed.
    Approve(OperatorId),
    /// Manual override to any status; refused only on terminal orders.
    SetStatus {
        status: OrderStatus,
        operator: OperatorId,
    },
    /// Confirmed/NotStarted → InProgress, gated on inventory.
    Prepare,
    /// Issues production orders for the shortfall without any transition.
    CreateProductionOrdersForShortfall,
    /// InProgress → ReadyToShip.
    MarkReadyToShip,
    /// Confirmed/ReadyToShip → Shipped.
    Ship,
    Cancel,
    /// Opens the delivery tracking record and ships the order.
    CreateTracking {
        details: ShippingDetails,
        operator: OperatorId,
    },
    /// Mirrors a status change of the order's own tracking record.
    RecordShipment {
        tracking: TrackingId,
        status: ShippingStatus,
    },
}

/// Results from OrderActions - variants match 1:1 with OrderAction. Each
/// carries the order as committed.
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    Approve(Order),
    SetStatus(Order),
    Prepare(Order, PreparationReport),
    CreateProductionOrdersForShortfall(Order, ShortfallReport),
    MarkReadyToShip(Order),
    Ship(Order),
    Cancel(Order),
    CreateTracking(Order, DeliveryTracking, ScanReference),
    RecordShipment(Order),
}
