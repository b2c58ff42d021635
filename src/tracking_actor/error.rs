//! Error types for the Tracking actor.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TrackingError {
    #[error("Tracking not found: {0}")]
    NotFound(String),

    /// Delivered is terminal.
    #[error("Shipment {0} was already delivered")]
    AlreadyDelivered(String),

    /// Records are closed at Delivered, never removed.
    #[error("Tracking {0} cannot be deleted")]
    NotDeletable(String),

    #[error("Tracking number already in use: {0}")]
    DuplicateNumber(String),

    #[error("Tracking validation error: {0}")]
    ValidationError(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for TrackingError {
    fn from(msg: String) -> Self {
        TrackingError::ActorCommunicationError(msg)
    }
}
