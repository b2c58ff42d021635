//! Demo: one order from placement to doorstep.
//!
//! Stock is short for one product, so preparation issues a production order;
//! the run completes, stock is replenished and the parcel goes out.

use actor_framework::tracing::setup_tracing;
use fulfillment_pipeline::config::PipelineConfig;
use fulfillment_pipeline::lifecycle::FulfillmentSystem;
use fulfillment_pipeline::model::{
    Carrier, DeliveryAddress, DeliveryConfirmation, LineItem, OperatorId, OrderCreate,
    ProductCreate, ShippingDetails, ShippingStatus, StatusUpdate,
};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = PipelineConfig::from_env()?;
    let system = FulfillmentSystem::new(config);
    let operator = OperatorId::new("warehouse-1");

    let shelf = system
        .products
        .create_product(ProductCreate {
            name: "Oak shelf".into(),
            stock: 4,
            has_recipe: true,
        })
        .await?;
    let brackets = system
        .products
        .create_product(ProductCreate {
            name: "Steel brackets".into(),
            stock: 5,
            has_recipe: false,
        })
        .await?;

    let order_id = system
        .orders
        .place_order(OrderCreate {
            customer: "cust-1001".into(),
            items: vec![
                LineItem::new(shelf, 10, 89.0),
                LineItem::new(brackets, 5, 4.5),
            ],
            shipping_address: Some(DeliveryAddress {
                recipient: "Dana Levi".into(),
                street: "12 Herzl St".into(),
                city: "Haifa".into(),
                postal_code: Some("3303112".into()),
                country: Some("IL".into()),
                phone: None,
            }),
            requested_delivery_date: None,
        })
        .await?;
    info!(%order_id, "Order placed");

    let span = tracing::info_span!("preparation", %order_id);
    async {
        system.orders.approve(order_id.clone(), operator.clone()).await?;
        let (_, report) = system.orders.prepare(order_id.clone()).await?;
        for po in &report.production_orders {
            info!(order_number = %po.order_number, product_id = %po.product_id, quantity = po.quantity, "Production requested");
            system.production.complete(po.id.clone()).await?;
            system.products.restock(po.product_id.clone(), po.quantity).await?;
        }
        system.orders.mark_ready_to_ship(order_id.clone()).await?;
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    let (_, tracking, scan) = system
        .orders
        .create_tracking(
            order_id.clone(),
            ShippingDetails {
                carrier: Carrier::IsraelPost,
                ..Default::default()
            },
            operator.clone(),
        )
        .await?;
    info!(tracking_number = %tracking.tracking_number, url = %scan.url, "Tracking created");

    for (status, location) in [
        (ShippingStatus::PickedUp, "Haifa depot"),
        (ShippingStatus::InTransit, "Tel Aviv hub"),
        (ShippingStatus::OutForDelivery, "Haifa"),
    ] {
        system
            .fulfillment
            .append_status(
                tracking.id.clone(),
                StatusUpdate::new(status, operator.clone()).at(location),
            )
            .await?;
        let shown = system.fulfillment.display_status(order_id.clone()).await?;
        info!(status = %shown, "Order status");
    }

    system
        .fulfillment
        .mark_delivered(
            tracking.id.clone(),
            DeliveryConfirmation {
                signature: Some("signatures/dana.png".into()),
                ..Default::default()
            },
            operator,
        )
        .await?;

    let public = system
        .fulfillment
        .lookup_by_tracking_number(&tracking.tracking_number)
        .await?;
    info!(
        status = public.shipping_status.label(),
        entries = public.history.len(),
        "Public tracking view"
    );

    system.shutdown().await?;
    Ok(())
}
