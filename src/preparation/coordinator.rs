use super::{
    InventoryCheck, InventoryLedger, IssuerError, LedgerError, PreparationError, PreparationReport,
    ProductionOrderIssuer, ShortfallReport, SkippedShortfall,
};
use crate::model::{LineItem, Order, ProductionOrderCreate, ProductionOrderSummary};
use chrono::Utc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Work orders for an order without a requested date are due a week out.
const DEFAULT_PRODUCTION_LEAD_DAYS: i64 = 7;

/// Reconciles an order's line items against the ledger and asks production to
/// cover whatever is short.
///
/// The coordinator is stateless. The order actor builds one per command from
/// its context, and the actor's sequential loop is what keeps two `prepare`
/// calls on the same order from both getting past the NotStarted check.
///
/// Every collaborator call is bounded by `timeout`; an elapsed call counts as
/// the collaborator being unavailable.
pub struct PreparationCoordinator<'a> {
    ledger: &'a dyn InventoryLedger,
    issuer: &'a dyn ProductionOrderIssuer,
    timeout: Duration,
}

impl<'a> PreparationCoordinator<'a> {
    pub fn new(
        ledger: &'a dyn InventoryLedger,
        issuer: &'a dyn ProductionOrderIssuer,
        timeout: Duration,
    ) -> Self {
        Self {
            ledger,
            issuer,
            timeout,
        }
    }

    /// One check per line item, in line order. Stops at the first ledger failure.
    pub async fn check_inventory(
        &self,
        items: &[LineItem],
    ) -> Result<Vec<InventoryCheck>, LedgerError> {
        let mut checks = Vec::with_capacity(items.len());
        for item in items {
            let available =
                match timeout(self.timeout, self.ledger.available_quantity(&item.product_id)).await
                {
                    Ok(result) => result?,
                    Err(_) => {
                        return Err(LedgerError::Unavailable(format!(
                            "timed out after {}ms",
                            self.timeout.as_millis()
                        )))
                    }
                };
            let check = InventoryCheck::new(item.product_id.clone(), item.quantity, available);
            debug!(
                product_id = %check.product_id,
                required = check.required,
                available = check.available,
                missing = check.missing,
                "Inventory checked"
            );
            checks.push(check);
        }
        Ok(checks)
    }

    /// Requests a production order for exactly the missing quantity of every
    /// short item. Best effort: a failure on one item never stops the others.
    pub async fn cover_shortfall(&self, order: &Order, checks: Vec<InventoryCheck>) -> ShortfallReport {
        let due_date = order.requested_delivery_date.unwrap_or_else(|| {
            Utc::now() + chrono::Duration::days(DEFAULT_PRODUCTION_LEAD_DAYS)
        });

        let mut created = Vec::new();
        let mut skipped = Vec::new();
        for check in checks.iter().filter(|check| check.is_short()) {
            let request = ProductionOrderCreate {
                product_id: check.product_id.clone(),
                quantity: check.missing,
                source_order: Some(order.id.clone()),
                due_date,
            };
            match self.issue(request).await {
                Ok(summary) => {
                    info!(order_id = %order.id, product_id = %summary.product_id, order_number = %summary.order_number, quantity = summary.quantity, "Production order issued");
                    created.push(summary);
                }
                Err(reason) => {
                    warn!(order_id = %order.id, product_id = %check.product_id, error = %reason, "Shortfall not covered");
                    skipped.push(SkippedShortfall {
                        check: check.clone(),
                        reason,
                    });
                }
            }
        }

        ShortfallReport {
            checks,
            created,
            skipped,
        }
    }

    /// The inventory gate in front of `preparation_status = InProgress`.
    ///
    /// `Ok` means every item is on hand or now has a production order. An
    /// unavailable issuer wins over `NoRecipe`, since retrying may succeed.
    /// Production orders issued before a failure are not withdrawn.
    pub async fn prepare(&self, order: &Order) -> Result<PreparationReport, PreparationError> {
        let checks = self.check_inventory(&order.items).await?;
        let report = self.cover_shortfall(order, checks).await;

        let unavailable = report.skipped.iter().find_map(|skip| match &skip.reason {
            IssuerError::Unavailable(msg) => Some(msg.clone()),
            IssuerError::NoRecipe(_) => None,
        });
        if let Some(msg) = unavailable {
            return Err(PreparationError::IssuerUnavailable(msg));
        }
        if !report.skipped.is_empty() {
            return Err(PreparationError::InsufficientInventory(
                report.short_items().cloned().collect(),
            ));
        }

        Ok(PreparationReport {
            checks: report.checks,
            production_orders: report.created,
        })
    }

    /// `prepare` without the gate: issue what can be issued and report the rest.
    pub async fn create_for_shortfall(&self, order: &Order) -> Result<ShortfallReport, LedgerError> {
        let checks = self.check_inventory(&order.items).await?;
        Ok(self.cover_shortfall(order, checks).await)
    }

    /// An elapsed call is not withdrawn: the issuer may still create the
    /// work order after the caller gave up on it.
    async fn issue(&self, request: ProductionOrderCreate) -> Result<ProductionOrderSummary, IssuerError> {
        let product_id = request.product_id.clone();
        let quantity = request.quantity;
        match timeout(self.timeout, self.issuer.create_production_order(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(
                    %product_id,
                    quantity,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Production request timed out; a work order may still have been created"
                );
                Err(IssuerError::Unavailable(format!(
                    "timed out after {}ms; a work order for {product_id} may still have been created",
                    self.timeout.as_millis()
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{OrderCreate, OrderId, ProductId, ProductionOrderId};
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubLedger {
        stock: HashMap<ProductId, u32>,
        down: bool,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl InventoryLedger for StubLedger {
        async fn available_quantity(&self, product: &ProductId) -> Result<u32, LedgerError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.down {
                return Err(LedgerError::Unavailable("connection refused".into()));
            }
            Ok(self.stock.get(product).copied().unwrap_or(0))
        }
    }

    #[derive(Default)]
    struct StubIssuer {
        no_recipe: HashSet<ProductId>,
        unavailable: HashSet<ProductId>,
        delay: Option<Duration>,
        issued: Mutex<Vec<ProductionOrderCreate>>,
    }

    impl StubIssuer {
        fn issued(&self) -> Vec<ProductionOrderCreate> {
            self.issued.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ProductionOrderIssuer for StubIssuer {
        async fn create_production_order(
            &self,
            request: ProductionOrderCreate,
        ) -> Result<ProductionOrderSummary, IssuerError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.no_recipe.contains(&request.product_id) {
                return Err(IssuerError::NoRecipe(request.product_id));
            }
            if self.unavailable.contains(&request.product_id) {
                return Err(IssuerError::Unavailable("503".into()));
            }
            let mut issued = self.issued.lock().unwrap();
            issued.push(request.clone());
            let id = ProductionOrderId(issued.len() as u32);
            Ok(ProductionOrderSummary {
                order_number: id.order_number(),
                id,
                product_id: request.product_id,
                quantity: request.quantity,
            })
        }
    }

    const A: ProductId = ProductId(1);
    const B: ProductId = ProductId(2);

    fn order(items: &[(ProductId, u32)]) -> Order {
        let params = OrderCreate {
            customer: "cust-1".into(),
            items: items
                .iter()
                .map(|(p, q)| LineItem::new(p.clone(), *q, 10.0))
                .collect(),
            shipping_address: None,
            requested_delivery_date: None,
        };
        Order::new(OrderId(1), params, Utc::now())
    }

    fn ledger(stock: &[(ProductId, u32)]) -> StubLedger {
        StubLedger {
            stock: stock.iter().cloned().collect(),
            ..Default::default()
        }
    }

    fn coordinator<'a>(ledger: &'a StubLedger, issuer: &'a StubIssuer) -> PreparationCoordinator<'a> {
        PreparationCoordinator::new(ledger, issuer, Duration::from_millis(50))
    }

    #[tokio::test]
    async fn sufficient_stock_issues_nothing() {
        let ledger = ledger(&[(A, 10), (B, 5)]);
        let issuer = StubIssuer::default();

        let report = coordinator(&ledger, &issuer)
            .prepare(&order(&[(A, 10), (B, 5)]))
            .await
            .unwrap();

        assert!(report.production_orders.is_empty());
        assert!(issuer.issued().is_empty());
        assert!(report.checks.iter().all(|c| c.missing == 0));
    }

    #[tokio::test]
    async fn shortfall_is_covered_for_exactly_the_missing_quantity() {
        let ledger = ledger(&[(A, 4), (B, 5)]);
        let issuer = StubIssuer::default();

        let report = coordinator(&ledger, &issuer)
            .prepare(&order(&[(A, 10), (B, 5)]))
            .await
            .unwrap();

        assert_eq!(report.production_orders.len(), 1);
        assert_eq!(report.production_orders[0].product_id, A);
        assert_eq!(report.production_orders[0].quantity, 6);
        assert_eq!(report.production_orders[0].order_number, "PO-000001");

        let issued = issuer.issued();
        assert_eq!(issued[0].source_order, Some(OrderId(1)));
    }

    #[tokio::test]
    async fn no_recipe_fails_with_every_short_item_itemized() {
        let ledger = ledger(&[(A, 4), (B, 1)]);
        let issuer = StubIssuer {
            no_recipe: [B].into_iter().collect(),
            ..Default::default()
        };

        let err = coordinator(&ledger, &issuer)
            .prepare(&order(&[(A, 10), (B, 5)]))
            .await
            .unwrap_err();

        let items = match err {
            PreparationError::InsufficientInventory(items) => items,
            other => panic!("expected InsufficientInventory, got {other:?}"),
        };
        assert_eq!(
            items,
            vec![InventoryCheck::new(A, 10, 4), InventoryCheck::new(B, 5, 1)]
        );
        assert!(items.iter().all(|c| c.missing == c.required - c.available));
        // A was still attempted.
        assert_eq!(issuer.issued().len(), 1);
    }

    #[tokio::test]
    async fn issuer_outage_wins_over_no_recipe() {
        let ledger = ledger(&[]);
        let issuer = StubIssuer {
            no_recipe: [A].into_iter().collect(),
            unavailable: [B].into_iter().collect(),
            ..Default::default()
        };

        let err = coordinator(&ledger, &issuer)
            .prepare(&order(&[(A, 1), (B, 1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, PreparationError::IssuerUnavailable(_)));
    }

    #[tokio::test]
    async fn ledger_failure_aborts_before_any_production_request() {
        let ledger = StubLedger {
            down: true,
            ..Default::default()
        };
        let issuer = StubIssuer::default();

        let err = coordinator(&ledger, &issuer)
            .prepare(&order(&[(A, 1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, PreparationError::Ledger(LedgerError::Unavailable(_))));
        assert!(issuer.issued().is_empty());
    }

    #[tokio::test]
    async fn slow_ledger_times_out() {
        let ledger = StubLedger {
            delay: Some(Duration::from_millis(500)),
            ..Default::default()
        };
        let issuer = StubIssuer::default();

        let err = coordinator(&ledger, &issuer)
            .check_inventory(&order(&[(A, 1)]).items)
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unavailable(msg) if msg.contains("timed out")));
    }

    #[tokio::test]
    async fn slow_issuer_is_unavailable_and_flags_a_possible_work_order() {
        let ledger = ledger(&[(A, 4)]);
        let issuer = StubIssuer {
            delay: Some(Duration::from_millis(500)),
            ..Default::default()
        };

        let err = coordinator(&ledger, &issuer)
            .prepare(&order(&[(A, 10)]))
            .await
            .unwrap_err();
        match err {
            PreparationError::IssuerUnavailable(msg) => {
                assert!(msg.contains("timed out"));
                assert!(msg.contains("may still have been created"));
            }
            other => panic!("expected IssuerUnavailable, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn manual_shortfall_reports_skips_instead_of_failing() {
        let ledger = ledger(&[(A, 4)]);
        let issuer = StubIssuer {
            no_recipe: [A].into_iter().collect(),
            ..Default::default()
        };

        let report = coordinator(&ledger, &issuer)
            .create_for_shortfall(&order(&[(A, 10)]))
            .await
            .unwrap();

        assert!(report.created.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, IssuerError::NoRecipe(A));
    }

    #[tokio::test]
    async fn repeated_product_lines_are_checked_independently() {
        let ledger = ledger(&[(A, 3)]);
        let issuer = StubIssuer::default();

        let report = coordinator(&ledger, &issuer)
            .prepare(&order(&[(A, 2), (A, 5)]))
            .await
            .unwrap();

        assert_eq!(report.checks.len(), 2);
        assert_eq!(report.production_orders.len(), 1);
        assert_eq!(report.production_orders[0].quantity, 2);
    }
}
