//! # Tracking Actor
//!
//! Owns every [`DeliveryTracking`] record. The tracking number is the
//! entity's index key, so the runtime enforces its uniqueness and serves the
//! public lookup straight from the index.
//!
//! History rules (enforced in [`entity`]):
//! - entries are only appended, and timestamps never go backwards
//! - `shipping_status` is always the status of the last entry
//! - Delivered is terminal; `actual_delivery_date` is stamped exactly once,
//!   when Delivered is recorded
//!
//! Context: none. Keeping the tracking actor a leaf keeps the actor graph
//! acyclic; mirroring tracking progress onto the order is done by
//! [`FulfillmentClient`](crate::clients::FulfillmentClient).

pub mod actions;
pub mod entity;
pub mod error;
pub mod number;

pub use actions::*;
pub use error::*;
pub use number::generate_tracking_number;

use crate::model::DeliveryTracking;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Tracking actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<DeliveryTracking>, ResourceClient<DeliveryTracking>) {
    ResourceActor::new(buffer_size)
}
