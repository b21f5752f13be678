//! # TableAccess Trait
//!
//! Shared surface for table-specific clients: `get`, `list`, `delete` and `subscribe`
//! come for free once a wrapper exposes its inner [`TableClient`] and an error mapping.
use crate::{Change, FrameworkError, Record, TableClient};
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Implemented by typed wrappers such as `ProductClient` or `OrderClient`.
///
/// # Example
///
/// ```rust
/// use table_actor::{TableAccess, Record, FrameworkError, TableClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Glass { id: u32 }
/// #[derive(Debug)] struct GlassCreate;
/// #[derive(Debug)] struct GlassUpdate;
/// #[derive(Debug)] enum GlassAction {}
/// #[derive(Debug)] struct GlassError(String);
///
/// impl std::fmt::Display for GlassError {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "{}", self.0)
///     }
/// }
/// impl std::error::Error for GlassError {}
/// impl From<String> for GlassError {
///     fn from(s: String) -> Self { GlassError(s) }
/// }
///
/// #[async_trait]
/// impl Record for Glass {
///     type Id = u32;
///     type Create = GlassCreate;
///     type Update = GlassUpdate;
///     type Action = GlassAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = GlassError;
///
///     fn from_create_params(id: u32, _: GlassCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id })
///     }
///     async fn on_update(&mut self, _: GlassUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: GlassAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct GlassClient {
///     inner: TableClient<Glass>,
/// }
///
/// #[async_trait]
/// impl TableAccess<Glass> for GlassClient {
///     type Error = GlassError;
///
///     fn inner(&self) -> &TableClient<Glass> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         GlassError(e.to_string())
///     }
/// }
///
/// async fn usage(client: GlassClient) {
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait TableAccess<T: Record>: Send + Sync {
    /// The table-specific error type.
    type Error: From<String> + Send + Sync;

    fn inner(&self) -> &TableClient<T>;

    fn map_error(e: FrameworkError) -> Self::Error;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    fn subscribe(&self) -> broadcast::Receiver<Change<T>> {
        self.inner().subscribe()
    }
}
