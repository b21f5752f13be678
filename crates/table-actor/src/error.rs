//! # Table Errors
//!
//! Errors raised by the table plumbing itself, as opposed to the row errors each
//! [`Record`](crate::Record) defines. Row errors travel boxed inside [`FrameworkError::RowError`].

#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Table actor closed")]
    ActorClosed,
    #[error("Table actor dropped response channel")]
    ActorDropped,
    #[error("Row not found: {0}")]
    NotFound(String),
    #[error("Row error: {0}")]
    RowError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers a row's own error type from [`FrameworkError::RowError`].
    ///
    /// Anything else, including a row error of a different type, is handed back unchanged.
    pub fn downcast_row<E: std::error::Error + 'static>(self) -> Result<E, FrameworkError> {
        match self {
            FrameworkError::RowError(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::RowError),
            other => Err(other),
        }
    }
}
