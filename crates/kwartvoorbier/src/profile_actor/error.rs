//! Error types for the Profile table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProfileError {
    #[error("Profile not found: {0}")]
    NotFound(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProfileError {
    fn from(msg: String) -> Self {
        ProfileError::ActorCommunicationError(msg)
    }
}
