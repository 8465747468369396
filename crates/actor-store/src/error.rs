//! # Runtime Errors
//!
//! This module defines the common error types used throughout the store
//! runtime. Centralizing them keeps error handling consistent across all
//! actors and clients.

/// Errors that can occur within the store runtime itself.
///
/// Entity-specific failures (validation, guard rejections) travel inside the
/// `Entity` variant; everything else is channel plumbing or a missing id.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Whether this error wraps an entity-level rejection rather than a
    /// runtime fault.
    pub fn is_entity(&self) -> bool {
        matches!(self, StoreError::Entity(_))
    }
}
