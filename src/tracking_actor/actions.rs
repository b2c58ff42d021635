//! Custom actions for the Tracking actor. Every action returns the updated
//! record.

use crate::model::{DeliveryConfirmation, OperatorId, StatusUpdate};

#[derive(Debug, Clone)]
pub enum TrackingAction {
    /// Appends one history entry. Any status may follow any other, except
    /// that nothing follows Delivered.
    AppendStatus(StatusUpdate),
    /// Records Delivered along with the proof collected at the door.
    MarkDelivered {
        confirmation: DeliveryConfirmation,
        operator: OperatorId,
    },
    /// Stores a delivery-proof reference uploaded after the fact.
    AttachProof(String),
}
