//! # Generic Actor Server
//!
//! The `ResourceActor` owns every entity of one type and processes requests
//! for them one at a time. That sequential loop is the only writer of the
//! store, which is what makes check-then-write sequences inside a hook atomic.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Concurrency Model
/// Each actor runs in its own Tokio task and handles one message at a time,
/// so the store needs no `Mutex`. While a hook awaits another actor, this
/// actor's queue waits too; keep the dependency graph between actors acyclic.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Bin { id: u32, label: String }
/// #[derive(Debug)] struct BinCreate { label: String }
/// #[derive(Debug)] struct BinUpdate;
/// #[derive(Debug)] enum BinAction {}
/// #[derive(Debug, thiserror::Error)] #[error("bin error")] struct BinError;
///
/// #[async_trait]
/// impl ActorEntity for Bin {
///     type Id = u32;
///     type Create = BinCreate;
///     type Update = BinUpdate;
///     type Action = BinAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = BinError;
///
///     fn from_create_params(id: u32, p: BinCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, label: p.label })
///     }
///     fn index_key(&self) -> Option<String> { Some(self.label.clone()) }
///     async fn on_update(&mut self, _: BinUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: BinAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Bin>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(BinCreate { label: "A-01".into() }).await.unwrap();
///     let found = client.lookup("A-01".into()).await.unwrap().unwrap();
///     assert_eq!(found.id, id);
/// }
/// ```
///
/// ## Operations
///
/// * **Create**: next id from the `u32` counter, `from_create_params`,
///   `on_create`, index key uniqueness check, insert.
/// * **Get / Lookup / List**: clones out of the store (Lookup goes through
///   the secondary index).
/// * **Update / Action**: the hook runs on a draft copy; the draft replaces
///   the stored entity only when the hook succeeds and its index key is free.
/// * **Delete**: `on_delete`, then removal from store and index.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
    index: HashMap<String, T::Id>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; callers wait for
    /// space when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
            index: HashMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// The `context` is handed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "Order" rather than "fulfillment_pipeline::model::order::Order"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;
                    let result = self.create(id, params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Lookup { key, respond_to } => {
                    let item = self
                        .index
                        .get(&key)
                        .and_then(|id| self.store.get(id))
                        .cloned();
                    debug!(entity_type, %key, found = item.is_some(), "Lookup");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = current.clone();
                    let result = match draft.on_update(update, &context).await {
                        Ok(()) => self.commit(&id, draft).map(|item| item.clone()),
                        Err(e) => Err(FrameworkError::EntityError(Box::new(e))),
                    };
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    if let Some(removed) = self.store.remove(&id) {
                        if let Some(key) = removed.index_key() {
                            self.index.remove(&key);
                        }
                    }
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(current) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = current.clone();
                    let result = match draft.handle_action(action, &context).await {
                        Ok(outcome) => self.commit(&id, draft).map(|_| outcome),
                        Err(e) => Err(FrameworkError::EntityError(Box::new(e))),
                    };
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        id: T::Id,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let mut item = T::from_create_params(id.clone(), params)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        if let Some(key) = item.index_key() {
            if self.index.contains_key(&key) {
                return Err(FrameworkError::DuplicateKey(key));
            }
            self.index.insert(key, id.clone());
        }
        self.store.insert(id.clone(), item);
        Ok(id)
    }

    /// Replaces the stored entity with `draft`, keeping the index in step.
    fn commit(&mut self, id: &T::Id, draft: T) -> Result<&T, FrameworkError> {
        let old_key = self.store.get(id).and_then(|item| item.index_key());
        let new_key = draft.index_key();
        if new_key != old_key {
            if let Some(key) = &new_key {
                if self.index.get(key).is_some_and(|owner| owner != id) {
                    return Err(FrameworkError::DuplicateKey(key.clone()));
                }
            }
            if let Some(key) = old_key {
                self.index.remove(&key);
            }
            if let Some(key) = new_key {
                self.index.insert(key, id.clone());
            }
        }
        self.store.insert(id.clone(), draft);
        self.store
            .get(id)
            .ok_or_else(|| FrameworkError::NotFound(id.to_string()))
    }
}
