//! [`ActorEntity`] implementation for [`Order`].

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use super::OrderContext;
use crate::model::{
    OperatorId, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate, PreparationStatus,
    ShippingStatus, StatusOverride, TrackingId,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

impl Order {
    fn invalid(&self, action: &'static str) -> OrderError {
        OrderError::InvalidTransition {
            action,
            status: self.status,
            preparation: self.preparation_status,
        }
    }

    fn ensure_open(&self, action: &'static str) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            return Err(self.invalid(action));
        }
        Ok(())
    }

    fn ensure_preparing(&self, action: &'static str, expected: PreparationStatus) -> Result<(), OrderError> {
        if self.status != OrderStatus::Confirmed || self.preparation_status != expected {
            return Err(self.invalid(action));
        }
        Ok(())
    }

    fn override_status(
        &mut self,
        to: OrderStatus,
        operator: OperatorId,
        now: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        self.ensure_open("override the status of")?;
        let from = self.status;
        self.status = to;
        match to {
            OrderStatus::Confirmed => {
                self.confirmed_at.get_or_insert(now);
                self.confirmed_by.get_or_insert_with(|| operator.clone());
            }
            OrderStatus::Shipped => self.shipped_at = Some(now),
            OrderStatus::Delivered => self.delivered_at = Some(now),
            OrderStatus::Cancelled => self.cancelled_at = Some(now),
            OrderStatus::Pending | OrderStatus::OnHold => {}
        }
        warn!(order_id = %self.id, ?from, ?to, %operator, "Manual status override");
        self.overrides.push(StatusOverride {
            from,
            to,
            operator,
            at: now,
        });
        Ok(())
    }

    /// Tracking progress only moves the order when the move makes sense from
    /// where the order is. Updates from any record but the order's own are
    /// refused.
    fn record_shipment(
        &mut self,
        tracking: &TrackingId,
        shipping: ShippingStatus,
        now: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        if self.tracking_id.as_ref() != Some(tracking) {
            return Err(OrderError::ForeignTracking(tracking.to_string()));
        }
        match shipping {
            ShippingStatus::Delivered if !self.status.is_terminal() => {
                self.status = OrderStatus::Delivered;
                self.delivered_at = Some(now);
            }
            ShippingStatus::Exception | ShippingStatus::Returned
                if self.status == OrderStatus::Shipped =>
            {
                self.status = OrderStatus::OnHold;
            }
            _ => {}
        }
        Ok(())
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.items.is_empty() {
            return Err(OrderError::ValidationError(
                "an order needs at least one line item".into(),
            ));
        }
        if let Some(item) = params.items.iter().find(|item| item.quantity == 0) {
            return Err(OrderError::ValidationError(format!(
                "quantity for {} must be at least 1",
                item.product_id
            )));
        }
        if let Some(item) = params
            .items
            .iter()
            .find(|item| !item.unit_price.is_finite() || item.unit_price < 0.0)
        {
            return Err(OrderError::ValidationError(format!(
                "unit price for {} must be a non-negative amount",
                item.product_id
            )));
        }
        Ok(Order::new(id, params, Utc::now()))
    }

    /// Delivery details can change until the parcel leaves.
    async fn on_update(
        &mut self,
        update: OrderUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if matches!(
            self.status,
            OrderStatus::Shipped | OrderStatus::Delivered | OrderStatus::Cancelled
        ) {
            return Err(self.invalid("update"));
        }
        if let Some(address) = update.shipping_address {
            self.shipping_address = Some(address);
        }
        if let Some(date) = update.requested_delivery_date {
            self.requested_delivery_date = Some(date);
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Err(OrderError::NotDeletable(self.id.to_string()))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &Self::Context,
    ) -> Result<OrderActionResult, Self::Error> {
        let now = Utc::now();
        match action {
            OrderAction::Approve(operator) => {
                if self.status != OrderStatus::Pending {
                    return Err(self.invalid("approve"));
                }
                self.status = OrderStatus::Confirmed;
                self.confirmed_at = Some(now);
                self.confirmed_by = Some(operator);
                Ok(OrderActionResult::Approve(self.clone()))
            }
            OrderAction::SetStatus { status, operator } => {
                self.override_status(status, operator, now)?;
                Ok(OrderActionResult::SetStatus(self.clone()))
            }
            OrderAction::Prepare => {
                self.ensure_preparing("prepare", PreparationStatus::NotStarted)?;
                let report = ctx.coordinator().prepare(self).await?;
                self.preparation_status = PreparationStatus::InProgress;
                self.preparation_started_at = Some(Utc::now());
                info!(
                    order_id = %self.id,
                    production_orders = report.production_orders.len(),
                    "Preparation started"
                );
                Ok(OrderActionResult::Prepare(self.clone(), report))
            }
            OrderAction::CreateProductionOrdersForShortfall => {
                self.ensure_open("create production orders for")?;
                let report = ctx.coordinator().create_for_shortfall(self).await?;
                info!(
                    order_id = %self.id,
                    created = report.created.len(),
                    skipped = report.skipped.len(),
                    "Shortfall production requested"
                );
                Ok(OrderActionResult::CreateProductionOrdersForShortfall(
                    self.clone(),
                    report,
                ))
            }
            OrderAction::MarkReadyToShip => {
                self.ensure_preparing("mark ready to ship", PreparationStatus::InProgress)?;
                self.preparation_status = PreparationStatus::ReadyToShip;
                self.ready_to_ship_at = Some(now);
                Ok(OrderActionResult::MarkReadyToShip(self.clone()))
            }
            OrderAction::Ship => {
                self.ensure_preparing("ship", PreparationStatus::ReadyToShip)?;
                self.status = OrderStatus::Shipped;
                self.shipped_at = Some(now);
                Ok(OrderActionResult::Ship(self.clone()))
            }
            OrderAction::Cancel => {
                self.ensure_open("cancel")?;
                self.status = OrderStatus::Cancelled;
                self.cancelled_at = Some(now);
                Ok(OrderActionResult::Cancel(self.clone()))
            }
            OrderAction::CreateTracking {
                mut details,
                operator,
            } => {
                self.ensure_open("create tracking for")?;
                if self.tracking_id.is_some() {
                    return Err(OrderError::AlreadyTracked);
                }
                if self.preparation_status != PreparationStatus::ReadyToShip {
                    return Err(OrderError::NotReady);
                }
                if details.delivery_address.is_none() {
                    details.delivery_address = self.shipping_address.clone();
                }

                let (tracking, scan) = ctx.tracking.open(self.id.clone(), details, operator).await?;
                self.tracking_id = Some(tracking.id.clone());
                self.status = OrderStatus::Shipped;
                self.shipped_at.get_or_insert(now);
                info!(order_id = %self.id, tracking_number = %tracking.tracking_number, "Order shipped");
                Ok(OrderActionResult::CreateTracking(self.clone(), tracking, scan))
            }
            OrderAction::RecordShipment { tracking, status } => {
                self.record_shipment(&tracking, status, now)?;
                Ok(OrderActionResult::RecordShipment(self.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;
    use crate::model::ProductId;

    fn order() -> Order {
        Order::from_create_params(
            OrderId(1),
            OrderCreate {
                customer: "cust-1".into(),
                items: vec![LineItem::new(ProductId(1), 2, 12.5)],
                shipping_address: None,
                requested_delivery_date: None,
            },
        )
        .unwrap()
    }

    fn op() -> OperatorId {
        OperatorId::new("op-1")
    }

    #[test]
    fn new_orders_are_pending_and_not_started() {
        let order = order();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.preparation_status, PreparationStatus::NotStarted);
        assert_eq!(order.subtotal(), 25.0);
    }

    #[test]
    fn creation_validates_line_items() {
        let empty = OrderCreate {
            customer: "c".into(),
            items: vec![],
            shipping_address: None,
            requested_delivery_date: None,
        };
        assert!(matches!(
            Order::from_create_params(OrderId(1), empty),
            Err(OrderError::ValidationError(_))
        ));

        let zero = OrderCreate {
            customer: "c".into(),
            items: vec![LineItem::new(ProductId(1), 0, 1.0)],
            shipping_address: None,
            requested_delivery_date: None,
        };
        assert!(matches!(
            Order::from_create_params(OrderId(1), zero),
            Err(OrderError::ValidationError(_))
        ));
    }

    #[test]
    fn override_is_audited_and_stamps_time() {
        let mut order = order();
        let now = Utc::now();
        order
            .override_status(OrderStatus::Shipped, op(), now)
            .unwrap();

        assert_eq!(order.status, OrderStatus::Shipped);
        assert_eq!(order.shipped_at, Some(now));
        assert_eq!(order.overrides.len(), 1);
        assert_eq!(order.overrides[0].from, OrderStatus::Pending);
        assert_eq!(order.overrides[0].operator, op());
    }

    #[test]
    fn override_is_refused_on_terminal_orders() {
        let mut order = order();
        order.status = OrderStatus::Delivered;
        let err = order
            .override_status(OrderStatus::Pending, op(), Utc::now())
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
        assert!(order.overrides.is_empty());
    }

    fn shipped() -> Order {
        let mut order = order();
        order.status = OrderStatus::Shipped;
        order.tracking_id = Some(TrackingId(5));
        order
    }

    #[test]
    fn tracking_delivered_completes_a_shipped_order() {
        let mut order = shipped();
        order
            .record_shipment(&TrackingId(5), ShippingStatus::Delivered, Utc::now())
            .unwrap();
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.delivered_at.is_some());
        assert!(order.overrides.is_empty());
    }

    #[test]
    fn tracking_exception_puts_a_shipped_order_on_hold() {
        let mut order = shipped();
        order
            .record_shipment(&TrackingId(5), ShippingStatus::Exception, Utc::now())
            .unwrap();
        assert_eq!(order.status, OrderStatus::OnHold);

        // Only a Shipped order is moved.
        order
            .record_shipment(&TrackingId(5), ShippingStatus::Returned, Utc::now())
            .unwrap();
        assert_eq!(order.status, OrderStatus::OnHold);
    }

    #[test]
    fn tracking_never_reopens_a_cancelled_order() {
        let mut order = shipped();
        order.status = OrderStatus::Cancelled;
        order
            .record_shipment(&TrackingId(5), ShippingStatus::Delivered, Utc::now())
            .unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);
    }

    #[test]
    fn untracked_orders_refuse_shipment_updates() {
        let mut order = order();
        let err = order
            .record_shipment(&TrackingId(5), ShippingStatus::Delivered, Utc::now())
            .unwrap_err();
        assert_eq!(err, OrderError::ForeignTracking("tracking_5".into()));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.delivered_at.is_none());
    }

    #[test]
    fn updates_from_another_tracking_record_are_refused() {
        let mut order = shipped();
        assert!(matches!(
            order.record_shipment(&TrackingId(6), ShippingStatus::Delivered, Utc::now()),
            Err(OrderError::ForeignTracking(_))
        ));
        assert_eq!(order.status, OrderStatus::Shipped);
    }
}
