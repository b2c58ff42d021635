//! # Order Client
//!
//! One method per pipeline command. Each returns the order as committed by
//! the actor, plus whatever the command produced.

use crate::model::{
    DeliveryTracking, OperatorId, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate,
    PreparationStatus, ScanReference, ShippingDetails, ShippingStatus, TrackingId,
};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use crate::preparation::{PreparationReport, ShortfallReport};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

fn unexpected() -> OrderError {
    OrderError::ActorCommunicationError("unexpected action result".into())
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(items = params.items.len()))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Shipping address and requested date; refused once shipped.
    #[instrument(skip(self))]
    pub async fn update_details(&self, id: OrderId, update: OrderUpdate) -> Result<Order, OrderError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn approve(&self, id: OrderId, operator: OperatorId) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::Approve(operator)).await? {
            OrderActionResult::Approve(order) => Ok(order),
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        operator: OperatorId,
    ) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::SetStatus { status, operator }).await? {
            OrderActionResult::SetStatus(order) => Ok(order),
            _ => Err(unexpected()),
        }
    }

    /// Starts preparation, issuing production orders for any shortfall.
    #[instrument(skip(self))]
    pub async fn prepare(&self, id: OrderId) -> Result<(Order, PreparationReport), OrderError> {
        match self.act(id, OrderAction::Prepare).await? {
            OrderActionResult::Prepare(order, report) => Ok((order, report)),
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self))]
    pub async fn create_production_orders_for_shortfall(
        &self,
        id: OrderId,
    ) -> Result<(Order, ShortfallReport), OrderError> {
        match self
            .act(id, OrderAction::CreateProductionOrdersForShortfall)
            .await?
        {
            OrderActionResult::CreateProductionOrdersForShortfall(order, report) => {
                Ok((order, report))
            }
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self))]
    pub async fn mark_ready_to_ship(&self, id: OrderId) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::MarkReadyToShip).await? {
            OrderActionResult::MarkReadyToShip(order) => Ok(order),
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self))]
    pub async fn ship(&self, id: OrderId) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::Ship).await? {
            OrderActionResult::Ship(order) => Ok(order),
            _ => Err(unexpected()),
        }
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<Order, OrderError> {
        match self.act(id, OrderAction::Cancel).await? {
            OrderActionResult::Cancel(order) => Ok(order),
            _ => Err(unexpected()),
        }
    }

    /// Opens delivery tracking and ships the order.
    #[instrument(skip(self, details))]
    pub async fn create_tracking(
        &self,
        id: OrderId,
        details: ShippingDetails,
        operator: OperatorId,
    ) -> Result<(Order, DeliveryTracking, ScanReference), OrderError> {
        match self
            .act(id, OrderAction::CreateTracking { details, operator })
            .await?
        {
            OrderActionResult::CreateTracking(order, tracking, scan) => Ok((order, tracking, scan)),
            _ => Err(unexpected()),
        }
    }

    /// Reflects a status of the order's own tracking record onto the order.
    /// Driven by [`FulfillmentClient`](super::FulfillmentClient) only.
    #[instrument(skip(self))]
    pub(crate) async fn record_shipment(
        &self,
        id: OrderId,
        tracking: TrackingId,
        status: ShippingStatus,
    ) -> Result<Order, OrderError> {
        match self
            .act(id, OrderAction::RecordShipment { tracking, status })
            .await?
        {
            OrderActionResult::RecordShipment(order) => Ok(order),
            _ => Err(unexpected()),
        }
    }

    /// The preparation queue: InProgress orders, most recently started first.
    #[instrument(skip(self))]
    pub async fn orders_in_preparation(&self) -> Result<Vec<Order>, OrderError> {
        let mut orders: Vec<Order> = self
            .list()
            .await?
            .into_iter()
            .filter(|o| o.preparation_status == PreparationStatus::InProgress)
            .collect();
        orders.sort_by(|a, b| b.preparation_started_at.cmp(&a.preparation_started_at));
        Ok(orders)
    }

    async fn act(&self, id: OrderId, action: OrderAction) -> Result<OrderActionResult, OrderError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<OrderError>() {
            Ok(entity) => entity,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
