//! # ActorEntity Trait
//!
//! The contract every resource (orders, shipments, stock items, work orders)
//! implements to be owned by a [`ResourceActor`](crate::ResourceActor).
//! It names the id, the DTOs, the custom actions, the injected context and
//! the per-entity error type, and provides the lifecycle hooks the actor
//! calls while processing messages.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::index_key`]
//!
//! The defaults do nothing (or return `None` for the index key).

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are async so they can call other actors through the injected
/// `Context`. The context is handed to `run()` rather than `new()`, which lets
/// the system wire actors together after all of them have been constructed.
///
/// # Transactions
/// `on_update` and `handle_action` run against a copy of the stored entity.
/// The actor only replaces the stored value when the hook returns `Ok`, so a
/// hook may freely mutate `self` before discovering it has to fail.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Prepare`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One enum per actor rather than one per message: clients match on a
    /// single type, at the cost of every action nominally being able to
    /// return every variant.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full Entity from the ID and Payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Secondary unique key for this entity, if it has one.
    ///
    /// The actor keeps an index from this key to the entity id, rejects a
    /// create whose key is already taken, and serves
    /// [`ResourceClient::lookup`](crate::ResourceClient::lookup) from it.
    fn index_key(&self) -> Option<String> {
        None
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after `from_create_params`, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the system.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
