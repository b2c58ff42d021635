//! [`ActorEntity`] implementation for [`ProductionOrder`].

use super::actions::ProductionAction;
use super::error::ProductionError;
use crate::clients::ProductClient;
use crate::model::{
    ProductionOrder, ProductionOrderCreate, ProductionOrderId, ProductionOrderUpdate,
    ProductionStatus,
};
use actor_framework::{ActorClient, ActorEntity};
use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

#[async_trait]
impl ActorEntity for ProductionOrder {
    type Id = ProductionOrderId;
    type Create = ProductionOrderCreate;
    type Update = ProductionOrderUpdate;
    type Action = ProductionAction;
    type ActionResult = ProductionStatus;
    type Context = ProductClient;
    type Error = ProductionError;

    fn from_create_params(
        id: ProductionOrderId,
        params: ProductionOrderCreate,
    ) -> Result<Self, Self::Error> {
        if params.quantity == 0 {
            return Err(ProductionError::InvalidQuantity(0));
        }
        Ok(Self {
            order_number: id.order_number(),
            id,
            product_id: params.product_id,
            quantity: params.quantity,
            source_order: params.source_order,
            due_date: params.due_date,
            status: ProductionStatus::Planned,
            created_at: Utc::now(),
        })
    }

    /// Refuses products production can't build.
    async fn on_create(&mut self, products: &ProductClient) -> Result<(), Self::Error> {
        let product = products
            .get(self.product_id.clone())
            .await
            .map_err(|e| ProductionError::ActorCommunicationError(e.to_string()))?;
        match product {
            Some(product) if product.has_recipe => {
                debug!(product_id = %self.product_id, "Recipe found");
                Ok(())
            }
            _ => Err(ProductionError::NoRecipe(self.product_id.clone())),
        }
    }

    async fn on_update(
        &mut self,
        update: ProductionOrderUpdate,
        _ctx: &ProductClient,
    ) -> Result<(), Self::Error> {
        if self.status != ProductionStatus::Planned {
            return Err(ProductionError::AlreadyClosed(self.status));
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductionAction,
        _ctx: &ProductClient,
    ) -> Result<ProductionStatus, Self::Error> {
        if self.status != ProductionStatus::Planned {
            return Err(ProductionError::AlreadyClosed(self.status));
        }
        self.status = match action {
            ProductionAction::Complete => ProductionStatus::Completed,
            ProductionAction::Cancel => ProductionStatus::Cancelled,
        };
        Ok(self.status)
    }
}
