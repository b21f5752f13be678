//! # Change Notifications
//!
//! Every successful write on a table is broadcast to its subscribers as a [`Change`],
//! the in-process counterpart of a hosted database's INSERT / UPDATE / DELETE events.
//! Subscribers that fall behind receive `RecvError::Lagged` from tokio's broadcast
//! channel and are expected to resync with `list()`.

use crate::record::Record;

/// A single committed write.
#[derive(Debug, Clone)]
pub enum Change<T: Record> {
    Inserted(T),
    Updated(T),
    Deleted(T::Id),
}

impl<T: Record> Change<T> {
    /// Kind of write, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Change::Inserted(_) => "INSERT",
            Change::Updated(_) => "UPDATE",
            Change::Deleted(_) => "DELETE",
        }
    }
}
