//! # Product Actor
//!
//! The in-process inventory ledger: one [`Product`] per stocked item with its
//! on-hand quantity and whether production has a recipe for it.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`]
//! - [`new()`] - Factory function that creates the actor and client
//!
//! The order actor never talks to this actor directly. It goes through the
//! [`InventoryLedger`](crate::preparation::InventoryLedger) seam, which
//! [`ProductClient`](crate::clients::ProductClient) implements.
//!
//! ## Usage
//!
//! ```rust
//! use fulfillment_pipeline::clients::ProductClient;
//! use fulfillment_pipeline::model::ProductCreate;
//! use fulfillment_pipeline::preparation::InventoryLedger;
//! use fulfillment_pipeline::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, generic_client) = product_actor::new(32);
//!     let client = ProductClient::new(generic_client);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client
//!         .create_product(ProductCreate { name: "Oak shelf".into(), stock: 4, has_recipe: true })
//!         .await?;
//!     client.restock(id.clone(), 6).await?;
//!     assert_eq!(client.available_quantity(&id).await?, 10);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::model::Product;
use actor_framework::{ResourceActor, ResourceClient};

/// Creates a new Product actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ResourceClient<Product>) {
    ResourceActor::new(buffer_size)
}
