use crate::clients::{
    FulfillmentClient, OrderClient, ProductClient, ProductionClient, TrackingClient,
};
use crate::config::PipelineConfig;
use crate::order_actor::OrderContext;
use std::sync::Arc;
use tracing::{error, info};

/// The running pipeline: four actors and the clients that reach them.
///
/// # Example
///
/// ```ignore
/// let system = FulfillmentSystem::new(PipelineConfig::from_env()?);
/// let order_id = system.orders.place_order(params).await?;
/// system.orders.approve(order_id.clone(), operator).await?;
/// system.orders.prepare(order_id).await?;
/// system.shutdown().await?;
/// ```
pub struct FulfillmentSystem {
    pub orders: OrderClient,
    pub tracking: TrackingClient,
    pub products: ProductClient,
    pub production: ProductionClient,
    /// Cross-aggregate reads and tracking writes that sync the order.
    pub fulfillment: FulfillmentClient,

    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl FulfillmentSystem {
    /// Spawns all actors. Must be called inside a Tokio runtime.
    pub fn new(config: PipelineConfig) -> Self {
        let buffer = config.actor_buffer_size;

        // 1. Create actors (no dependencies)
        let (product_actor, product_client) = crate::product_actor::new(buffer);
        let (production_actor, production_client) = crate::production_actor::new(buffer);
        let (tracking_actor, tracking_client) = crate::tracking_actor::new(buffer);
        let (order_actor, order_client) = crate::order_actor::new(buffer);

        let products = ProductClient::new(product_client);
        let production = ProductionClient::new(production_client);
        let tracking = TrackingClient::new(tracking_client, &config);
        let orders = OrderClient::new(order_client);

        // 2. Start actors with injected context
        let product_handle = tokio::spawn(product_actor.run(()));
        let production_handle = tokio::spawn(production_actor.run(products.clone()));
        let tracking_handle = tokio::spawn(tracking_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            ledger: Arc::new(products.clone()),
            issuer: Arc::new(production.clone()),
            tracking: tracking.clone(),
            collaborator_timeout: config.collaborator_timeout,
        }));

        info!(
            buffer,
            timeout_ms = config.collaborator_timeout.as_millis() as u64,
            prefix = %config.tracking_prefix,
            "Fulfillment system started"
        );

        Self {
            fulfillment: FulfillmentClient::new(orders.clone(), tracking.clone()),
            orders,
            tracking,
            products,
            production,
            handles: vec![order_handle, tracking_handle, production_handle, product_handle],
        }
    }

    /// Drops every client, then waits for each actor to drain and exit.
    ///
    /// Any client clone still held elsewhere keeps its actor alive, and this
    /// waits for it.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Shutting down fulfillment system");
        drop(self.fulfillment);
        drop(self.orders);
        drop(self.tracking);
        drop(self.production);
        drop(self.products);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e);
            }
        }

        info!("Fulfillment system stopped");
        Ok(())
    }
}
