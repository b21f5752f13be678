//! Error types for the Location table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationError {
    #[error("Location not found: {0}")]
    NotFound(String),

    #[error("Location name must not be empty")]
    EmptyName,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for LocationError {
    fn from(msg: String) -> Self {
        LocationError::ActorCommunicationError(msg)
    }
}
