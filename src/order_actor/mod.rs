//! # Order Actor
//!
//! The order aggregate: status, preparation sub-status, line items and the
//! link to at most one tracking record.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Order`] with every transition rule
//! - [`error`] - [`OrderError`]
//! - [`actions`] - [`OrderAction`] and [`OrderActionResult`]
//! - [`OrderContext`] - the collaborators injected at `run()`
//!
//! ## State machine
//!
//! ```text
//! Pending --approve--> Confirmed --prepare--> Confirmed[InProgress]
//!   --mark_ready_to_ship--> Confirmed[ReadyToShip] --ship / create_tracking--> Shipped
//!   --tracking Delivered--> Delivered
//! any non-terminal --cancel--> Cancelled
//! ```
//!
//! `set_status` may force any status on a non-terminal order; each use is
//! appended to [`Order::overrides`](crate::model::Order::overrides).
//!
//! ## Atomicity
//!
//! The actor handles one message at a time and commits an action only when it
//! returns `Ok`. A `prepare` that fails on inventory therefore leaves the
//! order exactly as it was, and a second `prepare` queued behind the first
//! sees the committed InProgress and fails with `InvalidTransition`.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::TrackingClient;
use crate::model::Order;
use crate::preparation::{InventoryLedger, PreparationCoordinator, ProductionOrderIssuer};
use actor_framework::{ResourceActor, ResourceClient};
use std::sync::Arc;
use std::time::Duration;

/// Dependencies of the order actor.
#[derive(Clone)]
pub struct OrderContext {
    pub ledger: Arc<dyn InventoryLedger>,
    pub issuer: Arc<dyn ProductionOrderIssuer>,
    pub tracking: TrackingClient,
    /// Upper bound on each ledger/issuer call.
    pub collaborator_timeout: Duration,
}

impl OrderContext {
    pub fn coordinator(&self) -> PreparationCoordinator<'_> {
        PreparationCoordinator::new(
            self.ledger.as_ref(),
            self.issuer.as_ref(),
            self.collaborator_timeout,
        )
    }
}

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, ResourceClient<Order>) {
    ResourceActor::new(buffer_size)
}
