use actor_framework::mock::MockClient;
use actor_framework::{ActorClient, ActorEntity, FrameworkError};
use async_trait::async_trait;
use fulfillment_pipeline::clients::{OrderClient, ProductClient, ProductionClient, TrackingClient};
use fulfillment_pipeline::config::PipelineConfig;
use fulfillment_pipeline::model::{
    DeliveryAddress, DeliveryTracking, LineItem, OperatorId, OrderCreate, OrderId, OrderStatus,
    PreparationStatus, Product, ProductId, ProductionOrder, ProductionOrderCreate,
    ProductionOrderId, ProductionOrderSummary, ShippingDetails, TrackingCreate, TrackingId,
};
use fulfillment_pipeline::order_actor::{OrderContext, OrderError};
use fulfillment_pipeline::preparation::{
    InventoryLedger, IssuerError, LedgerError, ProductionOrderIssuer,
};
use fulfillment_pipeline::product_actor::ProductActionResult;
use fulfillment_pipeline::production_actor::ProductionError;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Ledger with plenty of everything.
struct FullShelves;

#[async_trait]
impl InventoryLedger for FullShelves {
    async fn available_quantity(&self, _: &ProductId) -> Result<u32, LedgerError> {
        Ok(1_000)
    }
}

/// Issuer that must never be called.
struct NoProduction;

#[async_trait]
impl ProductionOrderIssuer for NoProduction {
    async fn create_production_order(
        &self,
        request: ProductionOrderCreate,
    ) -> Result<ProductionOrderSummary, IssuerError> {
        panic!("unexpected production request: {request:?}")
    }
}

fn operator() -> OperatorId {
    OperatorId::new("op-1")
}

fn order_params(items: Vec<LineItem>) -> OrderCreate {
    OrderCreate {
        customer: "cust-1".into(),
        items,
        shipping_address: Some(DeliveryAddress {
            recipient: "Noa".into(),
            street: "1 Main St".into(),
            city: "Haifa".into(),
            ..Default::default()
        }),
        requested_delivery_date: None,
    }
}

fn tracking_client(mock: &MockClient<DeliveryTracking>) -> TrackingClient {
    TrackingClient::new(mock.client(), &PipelineConfig::default())
}

/// Spawns a REAL order actor over the given collaborators.
fn spawn_orders(
    ledger: Arc<dyn InventoryLedger>,
    issuer: Arc<dyn ProductionOrderIssuer>,
    tracking: TrackingClient,
) -> (OrderClient, JoinHandle<()>) {
    let (actor, client) = fulfillment_pipeline::order_actor::new(16);
    let handle = tokio::spawn(actor.run(OrderContext {
        ledger,
        issuer,
        tracking,
        collaborator_timeout: Duration::from_millis(500),
    }));
    (OrderClient::new(client), handle)
}

#[tokio::test]
async fn prepare_with_mocked_ledger_and_issuer() {
    // A: need 10, have 4. B: need 5, have 5.
    let mut products = MockClient::<Product>::new();
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::CheckStock(4));
    products
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::CheckStock(5));
    let mut production = MockClient::<ProductionOrder>::new();
    production.expect_create().return_ok(ProductionOrderId(1));
    let trackings = MockClient::<DeliveryTracking>::new();

    let (orders, handle) = spawn_orders(
        Arc::new(ProductClient::new(products.client())),
        Arc::new(ProductionClient::new(production.client())),
        tracking_client(&trackings),
    );

    let id = orders
        .place_order(order_params(vec![
            LineItem::new(ProductId(1), 10, 5.0),
            LineItem::new(ProductId(2), 5, 2.0),
        ]))
        .await
        .unwrap();
    orders.approve(id.clone(), operator()).await.unwrap();
    let (order, report) = orders.prepare(id.clone()).await.unwrap();

    assert_eq!(order.preparation_status, PreparationStatus::InProgress);
    assert!(order.preparation_started_at.is_some());
    assert_eq!(report.production_orders.len(), 1);
    let po = &report.production_orders[0];
    assert_eq!(po.product_id, ProductId(1));
    assert_eq!(po.quantity, 6);
    assert_eq!(po.order_number, "PO-000001");

    products.verify();
    production.verify();
    trackings.verify();

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn no_recipe_leaves_the_order_untouched() {
    let mut products = MockClient::<Product>::new();
    products
        .expect_action(ProductId(1))
        .return_ok(ProductActionResult::CheckStock(0));
    products
        .expect_action(ProductId(2))
        .return_ok(ProductActionResult::CheckStock(1));
    let mut production = MockClient::<ProductionOrder>::new();
    for product in [ProductId(1), ProductId(2)] {
        production
            .expect_create()
            .return_err(FrameworkError::EntityError(Box::new(ProductionError::NoRecipe(
                product,
            ))));
    }
    let trackings = MockClient::<DeliveryTracking>::new();

    let (orders, handle) = spawn_orders(
        Arc::new(ProductClient::new(products.client())),
        Arc::new(ProductionClient::new(production.client())),
        tracking_client(&trackings),
    );

    let id = orders
        .place_order(order_params(vec![
            LineItem::new(ProductId(1), 2, 5.0),
            LineItem::new(ProductId(2), 3, 2.0),
        ]))
        .await
        .unwrap();
    orders.approve(id.clone(), operator()).await.unwrap();

    match orders.prepare(id.clone()).await {
        Err(OrderError::InsufficientInventory(items)) => {
            assert_eq!(items.len(), 2);
            assert_eq!((items[0].required, items[0].available, items[0].missing), (2, 0, 2));
            assert_eq!((items[1].required, items[1].available, items[1].missing), (3, 1, 2));
        }
        other => panic!("expected InsufficientInventory, got {other:?}"),
    }

    let order = orders.get(id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(order.preparation_status, PreparationStatus::NotStarted);
    assert!(order.preparation_started_at.is_none());

    products.verify();
    production.verify();
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn tracking_is_created_once_and_ships_the_order() {
    let mut trackings = MockClient::<DeliveryTracking>::new();
    trackings.expect_create().return_ok(TrackingId(1));
    let record = DeliveryTracking::from_create_params(
        TrackingId(1),
        TrackingCreate {
            order_id: OrderId(1),
            tracking_number: "TRK-TEST-0001".into(),
            details: ShippingDetails::default(),
            created_by: operator(),
        },
    )
    .unwrap();
    trackings.expect_get(TrackingId(1)).return_ok(Some(record));

    let (orders, handle) = spawn_orders(
        Arc::new(FullShelves),
        Arc::new(NoProduction),
        tracking_client(&trackings),
    );

    let id = orders
        .place_order(order_params(vec![LineItem::new(ProductId(1), 1, 9.0)]))
        .await
        .unwrap();

    // Not ready yet: no tracking request may reach the tracking actor.
    assert_eq!(
        orders
            .create_tracking(id.clone(), ShippingDetails::default(), operator())
            .await,
        Err(OrderError::NotReady)
    );

    orders.approve(id.clone(), operator()).await.unwrap();
    orders.prepare(id.clone()).await.unwrap();
    orders.mark_ready_to_ship(id.clone()).await.unwrap();

    let (order, tracking, scan) = orders
        .create_tracking(id.clone(), ShippingDetails::default(), operator())
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Shipped);
    assert!(order.shipped_at.is_some());
    assert_eq!(order.tracking_id, Some(TrackingId(1)));
    assert_eq!(tracking.tracking_number, "TRK-TEST-0001");
    assert_eq!(scan.url, "http://localhost:5173/track/TRK-TEST-0001");

    // Shipped is not terminal, so the second attempt reaches the tracking check.
    assert_eq!(
        orders
            .create_tracking(id, ShippingDetails::default(), operator())
            .await,
        Err(OrderError::AlreadyTracked)
    );

    trackings.verify();
    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn commands_enforce_their_preconditions() {
    let trackings = MockClient::<DeliveryTracking>::new();
    let (orders, handle) = spawn_orders(
        Arc::new(FullShelves),
        Arc::new(NoProduction),
        tracking_client(&trackings),
    );
    let id = orders
        .place_order(order_params(vec![LineItem::new(ProductId(1), 1, 9.0)]))
        .await
        .unwrap();

    // Pending: cannot prepare, ship or mark ready.
    for result in [
        orders.prepare(id.clone()).await.map(|_| ()),
        orders.mark_ready_to_ship(id.clone()).await.map(|_| ()),
        orders.ship(id.clone()).await.map(|_| ()),
    ] {
        assert!(matches!(result, Err(OrderError::InvalidTransition { .. })));
    }

    orders.approve(id.clone(), operator()).await.unwrap();
    assert!(matches!(
        orders.approve(id.clone(), operator()).await,
        Err(OrderError::InvalidTransition { action: "approve", .. })
    ));

    orders.prepare(id.clone()).await.unwrap();
    assert!(matches!(
        orders.prepare(id.clone()).await,
        Err(OrderError::InvalidTransition { action: "prepare", .. })
    ));

    let cancelled = orders.cancel(id.clone()).await.unwrap();
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert!(matches!(
        orders.cancel(id.clone()).await,
        Err(OrderError::InvalidTransition { .. })
    ));
    assert!(matches!(
        orders
            .set_status(id, OrderStatus::Pending, operator())
            .await,
        Err(OrderError::InvalidTransition { .. })
    ));

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn manual_override_is_recorded() {
    let trackings = MockClient::<DeliveryTracking>::new();
    let (orders, handle) = spawn_orders(
        Arc::new(FullShelves),
        Arc::new(NoProduction),
        tracking_client(&trackings),
    );
    let id = orders
        .place_order(order_params(vec![LineItem::new(ProductId(1), 1, 9.0)]))
        .await
        .unwrap();

    let order = orders
        .set_status(id.clone(), OrderStatus::OnHold, OperatorId::new("supervisor"))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::OnHold);
    assert_eq!(order.overrides.len(), 1);
    assert_eq!(order.overrides[0].from, OrderStatus::Pending);
    assert_eq!(order.overrides[0].to, OrderStatus::OnHold);
    assert_eq!(order.overrides[0].operator, OperatorId::new("supervisor"));

    let order = orders
        .set_status(id, OrderStatus::Delivered, OperatorId::new("supervisor"))
        .await
        .unwrap();
    assert!(order.delivered_at.is_some());
    assert_eq!(order.overrides.len(), 2);

    drop(orders);
    handle.await.unwrap();
}

#[tokio::test]
async fn unknown_order_is_not_found() {
    let trackings = MockClient::<DeliveryTracking>::new();
    let (orders, handle) = spawn_orders(
        Arc::new(FullShelves),
        Arc::new(NoProduction),
        tracking_client(&trackings),
    );

    assert_eq!(
        orders.approve(OrderId(77), operator()).await,
        Err(OrderError::NotFound("order_77".into()))
    );

    drop(orders);
    handle.await.unwrap();
}
