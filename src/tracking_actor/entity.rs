//! [`ActorEntity`] implementation for [`DeliveryTracking`].

use super::actions::TrackingAction;
use super::error::TrackingError;
use crate::model::{
    DeliveryTracking, HistoryEntry, OperatorId, ShippingStatus, TrackingCreate, TrackingId,
    TrackingUpdate,
};
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

const CREATED_NOTE: &str = "Tracking created";
const DELIVERED_NOTE: &str = "Marked as delivered";

impl DeliveryTracking {
    /// Wall-clock now, unless the last entry is later (clock skew); history
    /// timestamps never decrease.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.history.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        }
    }

    fn ensure_open(&self) -> Result<(), TrackingError> {
        if self.is_delivered() {
            return Err(TrackingError::AlreadyDelivered(self.tracking_number.clone()));
        }
        Ok(())
    }

    fn append(
        &mut self,
        status: ShippingStatus,
        location: Option<String>,
        notes: Option<String>,
        updated_by: Option<OperatorId>,
    ) {
        let timestamp = self.next_timestamp();
        if location.is_some() {
            self.current_location = location.clone();
        }
        self.history.push(HistoryEntry {
            status,
            location,
            notes,
            timestamp,
            updated_by,
        });
        self.shipping_status = status;
        if status == ShippingStatus::Delivered {
            self.actual_delivery_date = Some(timestamp);
        }
    }
}

#[async_trait]
impl ActorEntity for DeliveryTracking {
    type Id = TrackingId;
    type Create = TrackingCreate;
    type Update = TrackingUpdate;
    type Action = TrackingAction;
    type ActionResult = DeliveryTracking;
    type Context = ();
    type Error = TrackingError;

    fn from_create_params(id: TrackingId, params: TrackingCreate) -> Result<Self, Self::Error> {
        let tracking_number = params.tracking_number.trim().to_string();
        if tracking_number.is_empty() {
            return Err(TrackingError::ValidationError(
                "tracking number must not be empty".into(),
            ));
        }

        let details = params.details;
        let now = Utc::now();
        Ok(Self {
            id,
            order_id: params.order_id,
            tracking_number,
            shipping_status: ShippingStatus::Preparing,
            carrier: details.carrier,
            shipping_company: details.shipping_company,
            current_location: None,
            estimated_delivery_date: details.estimated_delivery_date,
            actual_delivery_date: None,
            delivery_address: details.delivery_address,
            history: vec![HistoryEntry {
                status: ShippingStatus::Preparing,
                location: None,
                notes: Some(details.notes.unwrap_or_else(|| CREATED_NOTE.to_string())),
                timestamp: now,
                updated_by: Some(params.created_by.clone()),
            }],
            delivery_proof: None,
            signature: None,
            delivery_notes: None,
            created_by: params.created_by,
            created_at: now,
        })
    }

    fn index_key(&self) -> Option<String> {
        Some(self.tracking_number.clone())
    }

    async fn on_update(
        &mut self,
        update: TrackingUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        self.ensure_open()?;
        if let Some(carrier) = update.carrier {
            self.carrier = carrier;
        }
        if let Some(company) = update.shipping_company {
            self.shipping_company = Some(company);
        }
        if let Some(eta) = update.estimated_delivery_date {
            self.estimated_delivery_date = Some(eta);
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Err(TrackingError::NotDeletable(self.tracking_number.clone()))
    }

    async fn handle_action(
        &mut self,
        action: TrackingAction,
        _ctx: &Self::Context,
    ) -> Result<DeliveryTracking, Self::Error> {
        match action {
            TrackingAction::AppendStatus(update) => {
                self.ensure_open()?;
                self.append(
                    update.status,
                    update.location,
                    update.notes,
                    Some(update.operator),
                );
            }
            TrackingAction::MarkDelivered {
                confirmation,
                operator,
            } => {
                self.ensure_open()?;
                let note = confirmation
                    .notes
                    .clone()
                    .unwrap_or_else(|| DELIVERED_NOTE.to_string());
                self.append(
                    ShippingStatus::Delivered,
                    confirmation.location,
                    Some(note),
                    Some(operator),
                );
                if confirmation.proof.is_some() {
                    self.delivery_proof = confirmation.proof;
                }
                if confirmation.signature.is_some() {
                    self.signature = confirmation.signature;
                }
                self.delivery_notes = confirmation.notes;
            }
            TrackingAction::AttachProof(reference) => {
                if reference.trim().is_empty() {
                    return Err(TrackingError::ValidationError(
                        "proof reference must not be empty".into(),
                    ));
                }
                self.delivery_proof = Some(reference);
            }
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeliveryConfirmation, OrderId, ShippingDetails, StatusUpdate};

    fn operator() -> OperatorId {
        OperatorId::new("op-7")
    }

    fn tracking() -> DeliveryTracking {
        DeliveryTracking::from_create_params(
            TrackingId(1),
            TrackingCreate {
                order_id: OrderId(3),
                tracking_number: "TRK123".into(),
                details: ShippingDetails::default(),
                created_by: operator(),
            },
        )
        .unwrap()
    }

    async fn append(t: &mut DeliveryTracking, update: StatusUpdate) -> Result<DeliveryTracking, TrackingError> {
        t.handle_action(TrackingAction::AppendStatus(update), &()).await
    }

    #[test]
    fn creation_seeds_one_preparing_entry() {
        let t = tracking();
        assert_eq!(t.shipping_status, ShippingStatus::Preparing);
        assert_eq!(t.history.len(), 1);
        assert_eq!(t.history[0].notes.as_deref(), Some(CREATED_NOTE));
        assert_eq!(t.index_key().as_deref(), Some("TRK123"));
        assert!(t.actual_delivery_date.is_none());
    }

    #[test]
    fn blank_tracking_number_is_rejected() {
        let result = DeliveryTracking::from_create_params(
            TrackingId(1),
            TrackingCreate {
                order_id: OrderId(3),
                tracking_number: "  ".into(),
                details: ShippingDetails::default(),
                created_by: operator(),
            },
        );
        assert!(matches!(result, Err(TrackingError::ValidationError(_))));
    }

    #[tokio::test]
    async fn append_sets_status_and_location_from_the_entry() {
        let mut t = tracking();
        let updated = append(
            &mut t,
            StatusUpdate::new(ShippingStatus::InTransit, operator()).at("Tel Aviv"),
        )
        .await
        .unwrap();

        assert_eq!(updated.shipping_status, ShippingStatus::InTransit);
        assert_eq!(updated.current_location.as_deref(), Some("Tel Aviv"));
        let last = updated.last_entry().unwrap();
        assert_eq!(last.status, ShippingStatus::InTransit);
        assert_eq!(last.location.as_deref(), Some("Tel Aviv"));
        assert_eq!(last.updated_by, Some(operator()));
    }

    #[tokio::test]
    async fn missing_location_keeps_the_current_one() {
        let mut t = tracking();
        append(&mut t, StatusUpdate::new(ShippingStatus::PickedUp, operator()).at("Haifa"))
            .await
            .unwrap();
        append(&mut t, StatusUpdate::new(ShippingStatus::Exception, operator()).with_notes("Gate closed"))
            .await
            .unwrap();

        assert_eq!(t.current_location.as_deref(), Some("Haifa"));
        assert_eq!(t.shipping_status, ShippingStatus::Exception);

        // The entry records what was reported, nothing more.
        let last = t.last_entry().unwrap();
        assert_eq!(last.location, None);
        assert_eq!(last.notes.as_deref(), Some("Gate closed"));
    }

    #[tokio::test]
    async fn records_refuse_deletion() {
        let t = tracking();
        assert_eq!(
            t.on_delete(&()).await,
            Err(TrackingError::NotDeletable("TRK123".into()))
        );
    }

    #[tokio::test]
    async fn statuses_may_go_backwards() {
        let mut t = tracking();
        append(&mut t, StatusUpdate::new(ShippingStatus::OutForDelivery, operator()))
            .await
            .unwrap();
        append(&mut t, StatusUpdate::new(ShippingStatus::InTransit, operator()))
            .await
            .unwrap();
        assert_eq!(t.shipping_status, ShippingStatus::InTransit);
        assert_eq!(t.history.len(), 3);
    }

    #[tokio::test]
    async fn delivered_is_terminal_and_stamped_once() {
        let mut t = tracking();
        let confirmation = DeliveryConfirmation {
            proof: Some("proof/photo-1.jpg".into()),
            signature: Some("sig/abc".into()),
            ..Default::default()
        };
        t.handle_action(
            TrackingAction::MarkDelivered {
                confirmation: confirmation.clone(),
                operator: operator(),
            },
            &(),
        )
        .await
        .unwrap();

        let delivered_at = t.actual_delivery_date;
        assert!(delivered_at.is_some());
        assert_eq!(t.last_entry().unwrap().notes.as_deref(), Some(DELIVERED_NOTE));
        assert_eq!(t.delivery_proof.as_deref(), Some("proof/photo-1.jpg"));

        let again = t
            .handle_action(
                TrackingAction::MarkDelivered {
                    confirmation,
                    operator: operator(),
                },
                &(),
            )
            .await;
        assert_eq!(again, Err(TrackingError::AlreadyDelivered("TRK123".into())));

        let append_after = append(&mut t, StatusUpdate::new(ShippingStatus::Returned, operator())).await;
        assert!(matches!(append_after, Err(TrackingError::AlreadyDelivered(_))));
        assert_eq!(t.actual_delivery_date, delivered_at);
    }

    #[tokio::test]
    async fn appending_delivered_stamps_the_delivery_date() {
        let mut t = tracking();
        append(&mut t, StatusUpdate::new(ShippingStatus::Delivered, operator()))
            .await
            .unwrap();
        assert_eq!(t.actual_delivery_date, Some(t.last_entry().unwrap().timestamp));
    }

    #[tokio::test]
    async fn history_timestamps_never_decrease() {
        let mut t = tracking();
        let future = Utc::now() + chrono::Duration::hours(1);
        t.history[0].timestamp = future;

        append(&mut t, StatusUpdate::new(ShippingStatus::PickedUp, operator()))
            .await
            .unwrap();
        assert_eq!(t.history[1].timestamp, future);
        assert!(t.history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[tokio::test]
    async fn proof_can_be_attached_after_delivery() {
        let mut t = tracking();
        append(&mut t, StatusUpdate::new(ShippingStatus::Delivered, operator()))
            .await
            .unwrap();
        let updated = t
            .handle_action(TrackingAction::AttachProof("proof/late.pdf".into()), &())
            .await
            .unwrap();
        assert_eq!(updated.delivery_proof.as_deref(), Some("proof/late.pdf"));
        assert_eq!(updated.history.len(), 2);
    }
}
