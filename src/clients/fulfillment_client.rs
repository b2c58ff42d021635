//! # Fulfillment Client
//!
//! Cross-aggregate read and sync paths, and the only way to change a
//! shipment's status. The tracking actor knows nothing about orders, so
//! tracking changes that matter to the order are mirrored here, after the
//! tracking write has committed.

use super::{OrderClient, TrackingClient};
use crate::model::{
    DeliveryConfirmation, DeliveryTracking, OperatorId, Order, OrderId, PublicTrackingView,
    StatusUpdate, TrackingId,
};
use crate::order_actor::OrderError;
use crate::projection::{display_status, DisplayStatus};
use crate::tracking_actor::TrackingError;
use actor_framework::ActorClient;
use thiserror::Error;
use tracing::{instrument, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FulfillmentError {
    #[error(transparent)]
    Order(#[from] OrderError),

    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error("Not found: {0}")]
    NotFound(String),
}

#[derive(Clone)]
pub struct FulfillmentClient {
    orders: OrderClient,
    tracking: TrackingClient,
}

impl FulfillmentClient {
    pub fn new(orders: OrderClient, tracking: TrackingClient) -> Self {
        Self { orders, tracking }
    }

    /// Appends a tracking entry, then mirrors it onto the order.
    #[instrument(skip(self))]
    pub async fn append_status(
        &self,
        id: TrackingId,
        update: StatusUpdate,
    ) -> Result<DeliveryTracking, FulfillmentError> {
        let tracking = self.tracking.append_status(id, update).await?;
        self.sync_order(&tracking).await?;
        Ok(tracking)
    }

    /// Marks the shipment delivered; the order follows.
    #[instrument(skip(self))]
    pub async fn mark_delivered(
        &self,
        id: TrackingId,
        confirmation: DeliveryConfirmation,
        operator: OperatorId,
    ) -> Result<DeliveryTracking, FulfillmentError> {
        let tracking = self
            .tracking
            .mark_delivered(id, confirmation, operator)
            .await?;
        self.sync_order(&tracking).await?;
        Ok(tracking)
    }

    /// The order's tracking record, if it has one.
    #[instrument(skip(self))]
    pub async fn tracking_for_order(
        &self,
        id: OrderId,
    ) -> Result<Option<DeliveryTracking>, FulfillmentError> {
        let order = self.order(id).await?;
        self.tracking_of(&order).await
    }

    #[instrument(skip(self))]
    pub async fn display_status(&self, id: OrderId) -> Result<DisplayStatus, FulfillmentError> {
        let order = self.order(id).await?;
        let tracking = self.tracking_of(&order).await?;
        Ok(display_status(&order, tracking.as_ref()))
    }

    /// Public lookup; needs no operator and exposes no order data.
    #[instrument(skip(self))]
    pub async fn lookup_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> Result<PublicTrackingView, FulfillmentError> {
        Ok(self.tracking.lookup_public(tracking_number).await?)
    }

    async fn order(&self, id: OrderId) -> Result<Order, FulfillmentError> {
        self.orders
            .get(id.clone())
            .await?
            .ok_or_else(|| FulfillmentError::NotFound(id.to_string()))
    }

    async fn tracking_of(&self, order: &Order) -> Result<Option<DeliveryTracking>, FulfillmentError> {
        match &order.tracking_id {
            Some(id) => Ok(self.tracking.get(id.clone()).await?),
            None => Ok(None),
        }
    }

    /// A missing order is logged, not returned: the tracking write stands.
    async fn sync_order(&self, tracking: &DeliveryTracking) -> Result<(), FulfillmentError> {
        match self
            .orders
            .record_shipment(
                tracking.order_id.clone(),
                tracking.id.clone(),
                tracking.shipping_status,
            )
            .await
        {
            Ok(_) => Ok(()),
            Err(OrderError::NotFound(id)) => {
                warn!(order_id = %id, tracking_number = %tracking.tracking_number, "Tracking refers to a missing order");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
