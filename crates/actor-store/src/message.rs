//! # Store Messages
//!
//! This module defines the generic message types used for communication between
//! the `StoreClient` and `StoreActor`.

use crate::entity::StoreEntity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by store actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Messaging
/// Each store actor manages one entity collection, and every operation on that
/// collection arrives as a variant of this enum. Instead of defining ad-hoc
/// messages per resource, we standardize on collection lifecycle operations
/// plus a custom `Action` variant for resource-specific logic.
///
/// - **Create**: Mints an id, builds the entity via [`StoreEntity::Create`],
///   and replies with the stored entity.
/// - **Get**: Fetches the current state of one entity by id.
/// - **List**: Fetches every entity matching a [`StoreEntity::Filter`],
///   ordered by id.
/// - **Update**: Mutates an existing entity via [`StoreEntity::Update`].
/// - **Delete**: Removes an entity, subject to the entity's `on_delete` guard.
/// - **Action**: Executes a custom [`StoreEntity::Action`].
///
/// # Entity Interaction
/// The enum is generic over `T: StoreEntity` and built entirely from the
/// trait's associated types, so a payload for one entity type can never be
/// sent to another entity's store.
#[derive(Debug)]
pub enum StoreRequest<T: StoreEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
