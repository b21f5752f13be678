//! # Live Lists
//!
//! A local copy of a table kept current from its change stream, the way the order and
//! pickup screens stay fresh without polling.

use crate::model::{FeatureRequest, Location, Order, Product, Profile, Setting};
use table_actor::{Change, FrameworkError, Record, TableClient};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::warn;

/// Rows that know their own id.
pub trait Keyed: Record {
    fn key(&self) -> Self::Id;
}

macro_rules! keyed {
    ($($row:ty),* $(,)?) => {
        $(impl Keyed for $row {
            fn key(&self) -> Self::Id {
                self.id
            }
        })*
    };
}

keyed!(Product, Location, Order, Profile, FeatureRequest, Setting);

pub struct LiveList<T: Keyed> {
    client: TableClient<T>,
    changes: broadcast::Receiver<Change<T>>,
    rows: Vec<T>,
}

impl<T: Keyed> LiveList<T> {
    /// Subscribes, then loads the current rows. A write landing in between shows up in
    /// both, which is harmless since applying a change is idempotent.
    pub async fn open(client: TableClient<T>) -> Result<Self, FrameworkError> {
        let changes = client.subscribe();
        let rows = client.list().await?;
        Ok(Self {
            client,
            changes,
            rows,
        })
    }

    /// Rows in table order.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn apply(&mut self, change: Change<T>) {
        match change {
            Change::Inserted(row) | Change::Updated(row) => {
                let key = row.key();
                match self.rows.iter_mut().find(|r| r.key() == key) {
                    Some(slot) => *slot = row,
                    None => self.rows.push(row),
                }
            }
            Change::Deleted(id) => self.rows.retain(|r| r.key() != id),
        }
        self.rows
            .sort_by(|a, b| a.sort_key().cmp(&b.sort_key()).then_with(|| a.key().cmp(&b.key())));
    }

    /// Replaces the local copy with a fresh `list()`.
    pub async fn resync(&mut self) -> Result<(), FrameworkError> {
        self.rows = self.client.list().await?;
        Ok(())
    }

    /// Waits for the next change and applies it. Returns `false` once the stream has closed.
    pub async fn next_change(&mut self) -> Result<bool, FrameworkError> {
        match self.changes.recv().await {
            Ok(change) => {
                self.apply(change);
                Ok(true)
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Live list lagged, resyncing");
                self.resync().await?;
                Ok(true)
            }
            Err(RecvError::Closed) => Ok(false),
        }
    }

    /// Applies every change already queued without waiting. Returns how many were applied.
    pub async fn catch_up(&mut self) -> Result<usize, FrameworkError> {
        let mut applied = 0;
        loop {
            match self.changes.try_recv() {
                Ok(change) => {
                    self.apply(change);
                    applied += 1;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(skipped, "Live list lagged, resyncing");
                    self.resync().await?;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return Ok(applied),
            }
        }
    }
}
