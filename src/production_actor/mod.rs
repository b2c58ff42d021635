//! # Production Actor
//!
//! Holds the work orders issued to cover inventory shortfalls. Its create
//! hook asks the product actor whether the product has a buildable recipe and
//! refuses with [`ProductionError::NoRecipe`] if not, so the issuer seam sees
//! the same outcome a remote production service would report.
//!
//! Context: a [`ProductClient`](crate::clients::ProductClient).

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::ProductionOrder;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Production actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<ProductionOrder>, ResourceClient<ProductionOrder>) {
    ResourceActor::new(buffer_size)
}
