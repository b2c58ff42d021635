//! # Product Client
//!
//! High-level API over the product actor. Also the in-process
//! [`InventoryLedger`]: the order actor reads stock levels through it.

use crate::model::{Product, ProductCreate, ProductId};
use crate::preparation::{InventoryLedger, LedgerError};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Current stock level for a product.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            _ => Err(ProductError::ActorCommunicationError(
                "unexpected action result".into(),
            )),
        }
    }

    /// Adds `units` to stock and returns the new level.
    #[instrument(skip(self))]
    pub async fn restock(&self, id: ProductId, units: u32) -> Result<u32, ProductError> {
        match self
            .inner
            .perform_action(id, ProductAction::Restock(units))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::Restock(level) => Ok(level),
            _ => Err(ProductError::ActorCommunicationError(
                "unexpected action result".into(),
            )),
        }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<ProductError>() {
            Ok(entity) => entity,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[async_trait]
impl InventoryLedger for ProductClient {
    /// Products the ledger has never heard of have nothing on hand.
    async fn available_quantity(&self, product: &ProductId) -> Result<u32, LedgerError> {
        match self.check_stock(product.clone()).await {
            Ok(level) => Ok(level),
            Err(ProductError::NotFound(_)) => Ok(0),
            Err(e) => Err(LedgerError::Unavailable(e.to_string())),
        }
    }
}
