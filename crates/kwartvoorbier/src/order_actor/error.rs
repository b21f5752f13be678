//! Error types for the Order table.

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The product in the order does not exist.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// The product exists but can't be ordered on the order's weekday.
    #[error("Product {0} is not available today")]
    ProductUnavailable(String),

    /// The pickup location in the order does not exist.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// An error occurred while communicating with a table actor.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}
