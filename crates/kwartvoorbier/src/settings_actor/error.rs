//! Error types for the Settings table.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsError {
    #[error("Setting not found: {0}")]
    NotFound(String),

    #[error("Setting key must not be empty")]
    EmptyKey,

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for SettingsError {
    fn from(msg: String) -> Self {
        SettingsError::ActorCommunicationError(msg)
    }
}
