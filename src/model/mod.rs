//! Domain data structures. Each entity here is owned by one actor; the
//! [`ActorEntity`](actor_framework::ActorEntity) impls live in the `*_actor`
//! modules.

pub mod order;
pub mod product;
pub mod production;
pub mod tracking;

pub use order::*;
pub use product::*;
pub use production::*;
pub use tracking::*;
