//! # System Lifecycle
//!
//! Creates every actor, wires the dependencies in through `run(context)`
//! and shuts the whole pipeline down.
//!
//! ## Wiring
//!
//! Actors are created first, without dependencies, and receive their
//! collaborators when spawned:
//!
//! | actor | context |
//! |-------|---------|
//! | product | `()` |
//! | production | [`ProductClient`](crate::clients::ProductClient) (recipe check) |
//! | tracking | `()` |
//! | order | [`OrderContext`](crate::order_actor::OrderContext): ledger, issuer, tracking client, timeout |
//!
//! The graph is acyclic, so dropping the public clients is enough to stop
//! everything: the order actor exits first, dropping the clients in its
//! context, which lets the leaves exit in turn.
//!
//! ## Tracing
//!
//! Call [`actor_framework::tracing::setup_tracing`] once before building the
//! system.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```

pub mod fulfillment_system;

pub use fulfillment_system::*;
