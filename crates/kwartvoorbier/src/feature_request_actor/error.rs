//! Error types for the FeatureRequest table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeatureRequestError {
    #[error("Feature request not found: {0}")]
    NotFound(String),

    #[error("Feature request title must not be empty")]
    EmptyTitle,

    /// `Advance` was requested on a request that is already done.
    #[error("Feature request is already done")]
    AlreadyDone,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for FeatureRequestError {
    fn from(msg: String) -> Self {
        FeatureRequestError::ActorCommunicationError(msg)
    }
}
