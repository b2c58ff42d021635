//! Error types for the Order actor.

use crate::model::{OrderStatus, PreparationStatus};
use crate::preparation::{InventoryCheck, LedgerError, PreparationError};
use crate::tracking_actor::TrackingError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The command's precondition on status/preparation status doesn't hold.
    #[error("Cannot {action} an order in {status:?}/{preparation:?}")]
    InvalidTransition {
        action: &'static str,
        status: OrderStatus,
        preparation: PreparationStatus,
    },

    /// Every short item, itemized. Preparation status was not changed.
    #[error("Insufficient inventory for {} item(s)", .0.len())]
    InsufficientInventory(Vec<InventoryCheck>),

    #[error("Production order issuer unavailable: {0}")]
    IssuerUnavailable(String),

    #[error("Inventory ledger unavailable: {0}")]
    LedgerUnavailable(String),

    #[error("Order already has a tracking record")]
    AlreadyTracked,

    #[error("Order is not ready to ship")]
    NotReady,

    /// A shipment update from tracking the order doesn't hold.
    #[error("Tracking {0} does not belong to this order")]
    ForeignTracking(String),

    /// Orders are cancelled, never removed.
    #[error("Order {0} cannot be deleted")]
    NotDeletable(String),

    #[error("Order validation error: {0}")]
    ValidationError(String),

    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingError),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::ActorCommunicationError(msg)
    }
}

impl From<PreparationError> for OrderError {
    fn from(err: PreparationError) -> Self {
        match err {
            PreparationError::InsufficientInventory(items) => OrderError::InsufficientInventory(items),
            PreparationError::Ledger(e) => e.into(),
            PreparationError::IssuerUnavailable(msg) => OrderError::IssuerUnavailable(msg),
        }
    }
}

impl From<LedgerError> for OrderError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Unavailable(msg) => OrderError::LedgerUnavailable(msg),
        }
    }
}
