//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client downcasts framework errors back to its entity's own error
//! enum, so callers match on typed variants.

pub mod fulfillment_client;
pub mod order_client;
pub mod product_client;
pub mod production_client;
pub mod tracking_client;

pub use fulfillment_client::*;
pub use order_client::*;
pub use product_client::*;
pub use production_client::*;
pub use tracking_client::*;
