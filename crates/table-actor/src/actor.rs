//! # Table Actor
//!
//! The server half of a table. A `TableActor<T>` owns every row of type `T` and processes
//! requests one at a time inside its own Tokio task, so row state needs no locks.
//!
//! # Usage Pattern
//!
//! 1.  **Create**: `TableActor::new()` returns the actor and a [`TableClient`].
//! 2.  **Wire**: hand dependencies (other clients) to `actor.run(context)`.
//! 3.  **Run**: spawn the run loop.
//!
//! ```rust
//! use table_actor::{Record, TableActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Tap { id: u32, name: String }
//! #[derive(Debug)] struct TapCreate { name: String }
//! #[derive(Debug)] struct TapUpdate;
//! #[derive(Debug)] enum TapAction {}
//! #[derive(Debug)] struct TapError(String);
//!
//! impl std::fmt::Display for TapError {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
//! }
//! impl std::error::Error for TapError {}
//!
//! #[async_trait]
//! impl Record for Tap {
//!     type Id = u32;
//!     type Create = TapCreate;
//!     type Update = TapUpdate;
//!     type Action = TapAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = TapError;
//!
//!     fn from_create_params(id: u32, p: TapCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: p.name })
//!     }
//!     async fn on_update(&mut self, _: TapUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: TapAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = TableActor::<Tap>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(TapCreate { name: "Pils".into() }).await.unwrap();
//!     let rows = client.list().await.unwrap();
//!     assert_eq!(rows[0].id, id);
//! }
//! ```

use crate::change::Change;
use crate::client::TableClient;
use crate::error::FrameworkError;
use crate::message::TableRequest;
use crate::record::Record;
use std::collections::HashMap;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

/// Capacity of the change broadcast. Slower subscribers observe `Lagged`.
pub const CHANGE_CAPACITY: usize = 256;

/// Owns the rows of one table and serves [`TableRequest`]s sequentially.
///
/// Ids come from an internal `u32` sequence starting at 1 and are never reused,
/// even after deletes.
pub struct TableActor<T: Record> {
    receiver: mpsc::Receiver<TableRequest<T>>,
    rows: HashMap<T::Id, T>,
    next_id: u32,
    changes: broadcast::Sender<Change<T>>,
}

impl<T: Record> TableActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` bounds the request queue; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, TableClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        let actor = Self {
            receiver,
            rows: HashMap::new(),
            next_id: 1,
            changes: changes.clone(),
        };
        (actor, TableClient::new(sender, changes))
    }

    fn sorted_rows(&self) -> Vec<T> {
        let mut rows: Vec<(&T::Id, &T)> = self.rows.iter().collect();
        rows.sort_by(|(a_id, a), (b_id, b)| {
            a.sort_key().cmp(&b.sort_key()).then_with(|| a_id.cmp(b_id))
        });
        rows.into_iter().map(|(_, row)| row.clone()).collect()
    }

    fn publish(&self, table: &str, change: Change<T>) {
        let kind = change.kind();
        // No receivers is the normal state between subscriptions.
        let receivers = self.changes.send(change).unwrap_or(0);
        debug!(table, kind, receivers, "Change published");
    }

    /// Serves requests until every client is dropped.
    ///
    /// `context` is passed to each hook, so dependencies created after `new()` can be
    /// injected here.
    pub async fn run(mut self, context: T::Context) {
        // "Product" rather than "kwartvoorbier::model::product::Product"
        let table = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(table, "Table started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Create { params, respond_to } => {
                    debug!(table, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut row = match T::from_create_params(id.clone(), params) {
                        Ok(row) => row,
                        Err(e) => {
                            warn!(table, error = %e, "Create rejected");
                            let _ = respond_to.send(Err(FrameworkError::RowError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = row.on_create(&context).await {
                        warn!(table, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::RowError(Box::new(e))));
                        continue;
                    }
                    self.rows.insert(id.clone(), row.clone());
                    info!(table, %id, size = self.rows.len(), "Created");
                    self.publish(table, Change::Inserted(row));
                    let _ = respond_to.send(Ok(id));
                }
                TableRequest::Get { id, respond_to } => {
                    let row = self.rows.get(&id).cloned();
                    debug!(table, %id, found = row.is_some(), "Get");
                    let _ = respond_to.send(Ok(row));
                }
                TableRequest::List { respond_to } => {
                    debug!(table, size = self.rows.len(), "List");
                    let _ = respond_to.send(Ok(self.sorted_rows()));
                }
                TableRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(table, %id, ?update, "Update");
                    let Some(row) = self.rows.get_mut(&id) else {
                        warn!(table, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    // Hooks mutate a scratch copy so a failed update leaves the row untouched.
                    let mut draft = row.clone();
                    if let Err(e) = draft.on_update(update, &context).await {
                        warn!(table, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::RowError(Box::new(e))));
                        continue;
                    }
                    *row = draft.clone();
                    info!(table, %id, "Updated");
                    self.publish(table, Change::Updated(draft.clone()));
                    let _ = respond_to.send(Ok(draft));
                }
                TableRequest::Delete { id, respond_to } => {
                    debug!(table, %id, "Delete");
                    let Some(row) = self.rows.get(&id) else {
                        warn!(table, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = row.on_delete(&context).await {
                        warn!(table, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::RowError(Box::new(e))));
                        continue;
                    }
                    self.rows.remove(&id);
                    info!(table, %id, size = self.rows.len(), "Deleted");
                    self.publish(table, Change::Deleted(id));
                    let _ = respond_to.send(Ok(()));
                }
                TableRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(table, %id, ?action, "Action");
                    let Some(row) = self.rows.get_mut(&id) else {
                        warn!(table, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut draft = row.clone();
                    match draft.handle_action(action, &context).await {
                        Ok(result) => {
                            *row = draft.clone();
                            info!(table, %id, "Action ok");
                            self.publish(table, Change::Updated(draft));
                            let _ = respond_to.send(Ok(result));
                        }
                        Err(e) => {
                            warn!(table, %id, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::RowError(Box::new(e))));
                        }
                    }
                }
            }
        }

        info!(table, size = self.rows.len(), "Shutdown");
    }
}
