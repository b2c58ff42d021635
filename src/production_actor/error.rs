//! Error types for the Production actor.

use crate::model::{ProductId, ProductionStatus};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductionError {
    #[error("Production order not found: {0}")]
    NotFound(String),

    /// The product is unknown or production has no recipe for it.
    #[error("No buildable recipe for {0}")]
    NoRecipe(ProductId),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("Production order is already {0:?}")]
    AlreadyClosed(ProductionStatus),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for ProductionError {
    fn from(msg: String) -> Self {
        ProductionError::ActorCommunicationError(msg)
    }
}
