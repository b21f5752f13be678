//! # Table Client
//!
//! The cloneable handle used to talk to a [`TableActor`](crate::TableActor).

use crate::change::Change;
use crate::error::FrameworkError;
use crate::message::TableRequest;
use crate::record::Record;
use tokio::sync::{broadcast, mpsc, oneshot};

/// Typed async API over a table.
///
/// Holds the request sender and the change broadcaster, so cloning is cheap and every
/// clone can both issue requests and open new change subscriptions.
#[derive(Clone)]
pub struct TableClient<T: Record> {
    sender: mpsc::Sender<TableRequest<T>>,
    changes: broadcast::Sender<Change<T>>,
}

impl<T: Record> TableClient<T> {
    pub fn new(
        sender: mpsc::Sender<TableRequest<T>>,
        changes: broadcast::Sender<Change<T>>,
    ) -> Self {
        Self { sender, changes }
    }

    /// Opens a change stream. Only writes committed after this call are delivered.
    pub fn subscribe(&self) -> broadcast::Receiver<Change<T>> {
        self.changes.subscribe()
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> TableRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| TableRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| TableRequest::Get { id, respond_to })
            .await
    }

    /// All rows ordered by [`Record::sort_key`], then id.
    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| TableRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| TableRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| TableRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| TableRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
