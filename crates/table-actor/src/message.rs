//! # Table Requests
//!
//! Messages sent from a [`TableClient`](crate::TableClient) to its
//! [`TableActor`](crate::TableActor). Each carries a oneshot sender for the reply.

use crate::error::FrameworkError;
use crate::record::Record;
use tokio::sync::oneshot;

/// Reply channel used by every request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// The operations a table understands: CRUD, a full ordered listing, and
/// row-specific actions.
#[derive(Debug)]
pub enum TableRequest<T: Record> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
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

impl<T: Record> TableRequest<T> {
    /// Short operation name, used in logs and mock diagnostics.
    pub fn op(&self) -> &'static str {
        match self {
            TableRequest::Create { .. } => "create",
            TableRequest::Get { .. } => "get",
            TableRequest::List { .. } => "list",
            TableRequest::Update { .. } => "update",
            TableRequest::Delete { .. } => "delete",
            TableRequest::Action { .. } => "action",
        }
    }
}
