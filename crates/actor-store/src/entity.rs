//! # StoreEntity Trait
//!
//! The `StoreEntity` trait is the contract every entity type (Order, Hub,
//! Drone, …) must satisfy to be managed by the generic [`StoreActor`].
//! It specifies associated types for IDs, DTOs, filters, actions, context,
//! and errors, and provides lifecycle hooks (`on_create`, `on_update`,
//! `on_delete`, `handle_action`).
//!
//! # Architecture Note
//! By defining one contract for all entity types, the message loop in
//! [`StoreActor`] is written once and reused everywhere. Associated types
//! keep every operation strongly typed: an `Order` store only accepts an
//! `OrderCreate` payload, and the compiler rejects anything else.
//!
//! # Provided Methods (Hooks)
//! `on_create` and `on_delete` have default no-op implementations. Override
//! `on_create` to run validation or enrichment after construction (it may
//! call other actors through the injected context), and `on_delete` to veto
//! removal. Returning an error from `on_delete` leaves the entity in the
//! store untouched, which is how deletion guards are expressed.
//!
//! [`StoreActor`]: crate::StoreActor

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Contract for entities managed by a [`StoreActor`](crate::StoreActor).
///
/// # Async & Context
/// The trait is `#[async_trait]` so hooks can await other actors. The
/// `Context` type carries those dependencies and is injected into every hook
/// at runtime via `StoreActor::run` ("late binding"), which keeps actor
/// construction free of circular references.
#[async_trait]
pub trait StoreEntity: Clone + Send + Sync + 'static {
    /// Unique identifier. `From<u32>` lets the actor mint sequential ids;
    /// `Ord` gives listings a deterministic order.
    type Id: Eq + Hash + Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload required to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload applied to an existing instance.
    type Update: Send + Sync + Debug;

    /// Predicate payload for filtered listings (see [`StoreEntity::matches`]).
    type Filter: Send + Sync + Debug;

    /// Entity-specific operations beyond CRUD (e.g. a status transition).
    type Action: Send + Sync + Debug;

    /// Result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into every hook. Use `()` when the
    /// entity needs none.
    type Context: Send + Sync;

    /// The entity's error type.
    ///
    /// # Design Note: Error Granularity
    /// One error enum per entity, not per operation. The enum is the union
    /// of everything the entity can reject; callers match on a single type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its freshly minted id and the create
    /// payload. Runs synchronously before `on_create`; this is where cheap
    /// structural validation belongs, so nothing invalid is ever stored.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity satisfies a listing filter.
    fn matches(&self, filter: &Self::Filter) -> bool;

    // --- Lifecycle hooks ---

    /// Called after construction, before the entity is inserted. Failure
    /// discards the entity.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update payload.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before removal. Returning an error vetoes the delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle an entity-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
