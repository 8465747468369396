//! # EntityClient Trait
//!
//! Provides a common interface for resource-specific clients, adding default
//! `get`, `list`, and `delete` methods built on top of a generic
//! [`StoreClient`].

use crate::{StoreClient, StoreEntity, StoreError};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard collection
/// operations.
///
/// Domain clients wrap a [`StoreClient`] and expose intent-named methods
/// (`place_order`, `register_hub`, …). The purely mechanical operations are
/// the same for every resource, so this trait provides them once; a wrapper
/// only supplies `inner` and an error mapping.
///
/// # Example
///
/// ```rust
/// use actor_store::{EntityClient, StoreClient, StoreEntity, StoreError};
/// use async_trait::async_trait;
///
/// // 1. Define Entity
/// #[derive(Clone, Debug)]
/// struct Courier { id: u32, name: String }
/// #[derive(Debug)] struct CourierCreate { name: String }
/// #[derive(Debug)] struct CourierUpdate;
/// #[derive(Debug)] struct CourierFilter;
/// #[derive(Debug)] enum CourierAction {}
/// #[derive(Debug)] struct CourierError(String);
///
/// // Error must implement Display + Error + From<String> + Send + Sync
/// impl std::fmt::Display for CourierError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{}", self.0)
///     }
/// }
/// impl std::error::Error for CourierError {}
///
/// impl From<String> for CourierError {
///     fn from(s: String) -> Self { CourierError(s) }
/// }
///
/// #[async_trait]
/// impl StoreEntity for Courier {
///     type Id = u32;
///     type Create = CourierCreate;
///     type Update = CourierUpdate;
///     type Filter = CourierFilter;
///     type Action = CourierAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = CourierError;
///
///     fn from_create_params(id: u32, params: CourierCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, name: params.name })
///     }
///     fn matches(&self, _: &CourierFilter) -> bool { true }
///     async fn on_update(&mut self, _: CourierUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: CourierAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// // 2. Define Client Wrapper
/// struct CourierClient {
///     inner: StoreClient<Courier>,
/// }
///
/// // 3. Implement EntityClient
/// #[async_trait]
/// impl EntityClient<Courier> for CourierClient {
///     type Error = CourierError;
///
///     fn inner(&self) -> &StoreClient<Courier> {
///         &self.inner
///     }
///
///     fn map_error(e: StoreError) -> Self::Error {
///         CourierError(e.to_string())
///     }
/// }
///
/// // 4. Usage
/// async fn usage(client: CourierClient) {
///     // get(), list(), and delete() are provided automatically!
///     let _ = client.get(1).await;
///     let _ = client.list(CourierFilter).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait EntityClient<T: StoreEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Map runtime errors to the specific resource error type.
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// List entities matching a filter.
    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
