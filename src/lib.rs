//! # Fulfillment Pipeline
//!
//! Order fulfillment and delivery tracking built on resource actors: one
//! Tokio task per entity type, each handling its messages one at a time.
//!
//! ## Flow
//!
//! ```text
//! place_order → approve → prepare ──(inventory check)──▶ InventoryLedger
//!                            │        shortfall ──────▶ ProductionOrderIssuer
//!                            ▼
//!                  mark_ready_to_ship → create_tracking → append_status … mark_delivered
//!                                                      ▲
//!                             lookup_by_tracking_number (public, no order data)
//! ```
//!
//! ## Module Tour
//!
//! ### 1. The Domain ([`model`])
//! Plain data: [`Order`](model::Order), [`DeliveryTracking`](model::DeliveryTracking),
//! [`Product`](model::Product), [`ProductionOrder`](model::ProductionOrder).
//!
//! ### 2. The Actors ([`order_actor`], [`tracking_actor`], [`product_actor`], [`production_actor`])
//! [`ActorEntity`](actor_framework::ActorEntity) implementations holding every
//! transition rule. Actions run on a draft and commit only on success.
//!
//! ### 3. Preparation ([`preparation`])
//! Inventory reconciliation behind the [`InventoryLedger`](preparation::InventoryLedger)
//! and [`ProductionOrderIssuer`](preparation::ProductionOrderIssuer) seams.
//!
//! ### 4. The Interface ([`clients`], [`projection`])
//! Typed clients per actor, the [`FulfillmentClient`](clients::FulfillmentClient)
//! facade, and the display-status projection.
//!
//! ### 5. The Orchestrator ([`lifecycle`], [`config`])
//! [`FulfillmentSystem`](lifecycle::FulfillmentSystem) spawns and wires the
//! actors from a [`PipelineConfig`](config::PipelineConfig).
//!
//! ## Running
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod order_actor;
pub mod preparation;
pub mod product_actor;
pub mod production_actor;
pub mod projection;
pub mod tracking_actor;
