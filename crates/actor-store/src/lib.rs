//! # Actor Store
//!
//! This crate provides the building blocks for type-safe, concurrent entity
//! stores in Rust. It implements a **Resource-Oriented Architecture (ROA)**
//! on top of the **Actor Model**: each entity collection is owned by exactly
//! one actor, every operation on the collection is a message, and messages
//! are processed strictly one at a time.
//!
//! ## Why ROA + Actor Model?
//!
//! ### Resource-Oriented Architecture
//!
//! - Standard collection operations (Create, Get, List, Update, Delete) on
//!   well-defined resources
//! - Predictable lifecycle management through entity hooks
//! - A uniform API surface across all resource types
//!
//! ### Actor Model
//!
//! - Isolated state (no shared memory, no locks)
//! - Message-passing concurrency
//! - Sequential processing within each actor eliminates race conditions
//!
//! ### The Synergy
//!
//! Every entity type gets its own actor with completely isolated state. When
//! resources need to interact, they communicate through **Action messages**
//! instead of direct coupling, and a compound read-modify-write expressed as
//! one action is atomic because nothing else runs between the read and the
//! write. The ROA provides structure; the Actor Model provides safe
//! concurrency.
//!
//! **Further Reading**:
//! - [Actor Model (Wikipedia)](https://en.wikipedia.org/wiki/Actor_model) - Foundational concurrency pattern by Carl Hewitt
//! - [Actors in Rust](https://ryhl.io/blog/actors-with-tokio/) - Practical guide to implementing actors with Tokio
//!
//! ## Architecture Overview
//!
//! Three layers, one contract:
//!
//! 1. **Entity Layer** ([`StoreEntity`]) - your business logic and domain
//!    models
//! 2. **Runtime Layer** ([`StoreActor`]) - message processing and
//!    concurrency
//! 3. **Interface Layer** ([`StoreClient`]) - type-safe communication
//!
//! Business logic is written **once** in the entity trait; the runtime
//! handles the async message passing, error plumbing, and state management.
//!
//! ## Quick Start
//!
//! ```rust
//! use actor_store::{StoreActor, StoreEntity};
//! use async_trait::async_trait;
//!
//! // 1. Define the Entity
//! #[derive(Clone, Debug)]
//! struct Station {
//!     id: u32,
//!     name: String,
//!     open: bool,
//! }
//!
//! #[derive(Debug)] struct StationCreate { name: String }
//! #[derive(Debug)] struct StationUpdate { open: bool }
//! #[derive(Debug)] struct OpenOnly;
//! #[derive(Debug)] enum StationAction {}
//! #[derive(Debug)] struct StationError(String);
//!
//! impl std::fmt::Display for StationError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
//! }
//! impl std::error::Error for StationError {}
//!
//! #[async_trait]
//! impl StoreEntity for Station {
//!     type Id = u32;
//!     type Create = StationCreate;
//!     type Update = StationUpdate;
//!     type Filter = OpenOnly;
//!     type Action = StationAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = StationError;
//!
//!     fn from_create_params(id: u32, params: StationCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: params.name, open: true })
//!     }
//!
//!     fn matches(&self, _: &OpenOnly) -> bool {
//!         self.open
//!     }
//!
//!     async fn on_update(&mut self, update: StationUpdate, _ctx: &Self::Context) -> Result<(), Self::Error> {
//!         self.open = update.open;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: StationAction, _: &Self::Context) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! // 2. Use the Actor
//! #[tokio::main]
//! async fn main() {
//!     // Create actor and client
//!     let (actor, client) = StoreActor::<Station>::new(10);
//!
//!     // Spawn the actor
//!     tokio::spawn(actor.run(()));
//!
//!     // Use the client
//!     let station = client.create(StationCreate { name: "North".into() }).await.unwrap();
//!     let fetched = client.get(station.id).await.unwrap().unwrap();
//!     assert_eq!(fetched.name, "North");
//! }
//! ```
//!
//! ## Context Injection Pattern
//!
//! Dependencies are injected at **runtime** via the `run()` method, not at
//! construction time. This "late binding" solves circular wiring: create all
//! actors first (each hands back a cheap, clonable client), then start each
//! run loop with whatever clients its entity needs.
//!
//! ```rust,ignore
//! // 1. Create all actors (no dependencies yet)
//! let (hub_actor, hub_client) = StoreActor::<Hub>::new(32);
//! let (order_actor, order_client) = StoreActor::<Order>::new(32);
//!
//! // 2. Wire dependencies when starting actors
//! tokio::spawn(hub_actor.run(()));
//! tokio::spawn(order_actor.run(OrderContext { hubs: hub_client }));
//! ```
//!
//! An entity's hooks receive `&Self::Context` on every call, so `on_create`
//! can validate against another actor and `handle_action` can trigger
//! follow-up work, all without the actors knowing about each other at
//! construction time.
//!
//! ## Type Safety
//!
//! - **Compile-time guarantees**: wrong message types for an actor do not
//!   compile
//! - **Type-safe errors**: each entity defines its own error type
//! - **No stringly-typed APIs**: ids, filters, actions, and results are all
//!   strongly typed
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Messages are processed **sequentially** within an actor (no locks
//!   needed)
//! - Multiple actors run in **parallel** (true concurrency)
//! - No shared mutable state (message passing only)
//!
//! ## Testing
//!
//! The [`mock`] module provides a **MockStore** that answers real
//! [`StoreClient`] requests from a queue of expectations, in-memory and
//! fully deterministic, plus raw channel helpers for asserting on request
//! payloads. See the module docs for the full testing guide.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

// Re-export core types for convenience
pub use actor::StoreActor;
pub use client::StoreClient;
pub use client_trait::EntityClient;
pub use entity::StoreEntity;
pub use error::StoreError;
pub use message::{Response, StoreRequest};
