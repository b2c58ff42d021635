//! # Production Client
//!
//! Typed API over the production actor, and the in-process
//! [`ProductionOrderIssuer`].

use crate::model::{
    ProductionOrder, ProductionOrderCreate, ProductionOrderId, ProductionOrderSummary,
    ProductionStatus,
};
use crate::preparation::{IssuerError, ProductionOrderIssuer};
use crate::production_actor::{ProductionAction, ProductionError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ProductionClient {
    inner: ResourceClient<ProductionOrder>,
}

impl ProductionClient {
    pub fn new(inner: ResourceClient<ProductionOrder>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create(
        &self,
        request: ProductionOrderCreate,
    ) -> Result<ProductionOrderId, ProductionError> {
        debug!("Sending request");
        self.inner.create(request).await.map_err(Self::map_error)
    }

    /// Planned → Completed.
    #[instrument(skip(self))]
    pub async fn complete(&self, id: ProductionOrderId) -> Result<ProductionStatus, ProductionError> {
        self.inner
            .perform_action(id, ProductionAction::Complete)
            .await
            .map_err(Self::map_error)
    }

    /// Planned → Cancelled.
    #[instrument(skip(self))]
    pub async fn cancel(&self, id: ProductionOrderId) -> Result<ProductionStatus, ProductionError> {
        self.inner
            .perform_action(id, ProductionAction::Cancel)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<ProductionOrder> for ProductionClient {
    type Error = ProductionError;

    fn inner(&self) -> &ResourceClient<ProductionOrder> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<ProductionError>() {
            Ok(entity) => entity,
            Err(FrameworkError::NotFound(id)) => ProductionError::NotFound(id),
            Err(other) => ProductionError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl ProductionOrderIssuer for ProductionClient {
    async fn create_production_order(
        &self,
        request: ProductionOrderCreate,
    ) -> Result<ProductionOrderSummary, IssuerError> {
        let product_id = request.product_id.clone();
        let quantity = request.quantity;
        match self.create(request).await {
            Ok(id) => Ok(ProductionOrderSummary {
                order_number: id.order_number(),
                id,
                product_id,
                quantity,
            }),
            Err(ProductionError::NoRecipe(product)) => Err(IssuerError::NoRecipe(product)),
            Err(e) => Err(IssuerError::Unavailable(e.to_string())),
        }
    }
}
