//! # Actor Framework
//!
//! Building blocks for systems where each kind of resource (orders,
//! shipments, stock items, work orders) is owned by one actor task and every
//! other part of the program reaches it through a typed client.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]): the domain type, its DTOs, its
//!    actions and its lifecycle hooks.
//! 2. **Runtime Layer** ([`ResourceActor`]): the message loop, the id
//!    counter, the secondary index and the commit-on-success rule.
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]): async,
//!    cloneable handles.
//!
//! Business rules live in the entity hooks; the runtime never inspects them.
//!
//! ## Example
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Shipment {
//!     id: u32,
//!     number: String,
//!     delivered: bool,
//! }
//!
//! #[derive(Debug)] struct ShipmentCreate { number: String }
//! #[derive(Debug)] struct ShipmentUpdate;
//! #[derive(Debug)] enum ShipmentAction { Deliver }
//!
//! #[derive(Debug, thiserror::Error)]
//! enum ShipmentError {
//!     #[error("already delivered")]
//!     AlreadyDelivered,
//! }
//!
//! #[async_trait]
//! impl ActorEntity for Shipment {
//!     type Id = u32;
//!     type Create = ShipmentCreate;
//!     type Update = ShipmentUpdate;
//!     type Action = ShipmentAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = ShipmentError;
//!
//!     fn from_create_params(id: u32, params: ShipmentCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, number: params.number, delivered: false })
//!     }
//!
//!     fn index_key(&self) -> Option<String> {
//!         Some(self.number.clone())
//!     }
//!
//!     async fn on_update(&mut self, _: ShipmentUpdate, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: ShipmentAction, _: &()) -> Result<(), Self::Error> {
//!         match action {
//!             ShipmentAction::Deliver if self.delivered => Err(ShipmentError::AlreadyDelivered),
//!             ShipmentAction::Deliver => {
//!                 self.delivered = true;
//!                 Ok(())
//!             }
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Shipment>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(ShipmentCreate { number: "TRK-1".into() }).await.unwrap();
//!     client.perform_action(id, ShipmentAction::Deliver).await.unwrap();
//!
//!     let again = client.perform_action(id, ShipmentAction::Deliver).await.unwrap_err();
//!     assert!(matches!(
//!         again.downcast_entity::<ShipmentError>(),
//!         Ok(ShipmentError::AlreadyDelivered)
//!     ));
//!
//!     let found = client.lookup("TRK-1".into()).await.unwrap().unwrap();
//!     assert!(found.delivered);
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies arrive through `run(context)`, not `new()`. Every actor can
//! be constructed first and wired afterwards, so the order in which actors are
//! spawned only has to respect who calls whom.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor
//! - Different actors run in parallel
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a client's requests from scripted
//! expectations, so an actor's dependencies can be faked without spawning them.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
