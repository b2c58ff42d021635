//! # Tracking Client
//!
//! Typed API over the tracking actor, including the unauthenticated
//! lookup by tracking number.

use crate::config::PipelineConfig;
use crate::model::{
    DeliveryConfirmation, DeliveryTracking, OperatorId, OrderId, PublicTrackingView,
    ScanReference, ShippingDetails, StatusUpdate, TrackingCreate, TrackingFilter, TrackingId,
    TrackingUpdate,
};
use crate::tracking_actor::{generate_tracking_number, TrackingAction, TrackingError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument, warn};

/// Fresh numbers tried before giving up on a collision streak.
const MAX_NUMBER_ATTEMPTS: usize = 5;

/// Cap on [`TrackingClient::list_filtered`].
pub const LIST_LIMIT: usize = 100;

#[derive(Clone)]
pub struct TrackingClient {
    inner: ResourceClient<DeliveryTracking>,
    prefix: String,
    public_base_url: String,
}

impl TrackingClient {
    pub fn new(inner: ResourceClient<DeliveryTracking>, config: &PipelineConfig) -> Self {
        Self {
            inner,
            prefix: config.tracking_prefix.clone(),
            public_base_url: config.public_tracking_base_url.clone(),
        }
    }

    /// Creates the tracking record for an order. A carrier-issued number is
    /// used as given; otherwise a fresh one is generated, retrying on
    /// collision. Only the order actor calls this, after its own checks.
    #[instrument(skip(self, details))]
    pub(crate) async fn open(
        &self,
        order_id: OrderId,
        details: ShippingDetails,
        created_by: OperatorId,
    ) -> Result<(DeliveryTracking, ScanReference), TrackingError> {
        if let Some(tracking_number) = details.tracking_number.clone() {
            let params = TrackingCreate {
                order_id,
                tracking_number,
                details,
                created_by,
            };
            let id = self.inner.create(params).await.map_err(Self::map_error)?;
            return self.opened(id).await;
        }

        for attempt in 1..=MAX_NUMBER_ATTEMPTS {
            let tracking_number = generate_tracking_number(&self.prefix, Utc::now());
            let params = TrackingCreate {
                order_id: order_id.clone(),
                tracking_number,
                details: details.clone(),
                created_by: created_by.clone(),
            };
            match self.inner.create(params).await {
                Ok(id) => return self.opened(id).await,
                Err(FrameworkError::DuplicateKey(number)) => {
                    warn!(%number, attempt, "Tracking number collision");
                }
                Err(e) => return Err(Self::map_error(e)),
            }
        }
        Err(TrackingError::DuplicateNumber(format!(
            "no free tracking number after {MAX_NUMBER_ATTEMPTS} attempts"
        )))
    }

    async fn opened(
        &self,
        id: TrackingId,
    ) -> Result<(DeliveryTracking, ScanReference), TrackingError> {
        debug!(%id, "Tracking created");
        let tracking = self
            .inner
            .get(id.clone())
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| TrackingError::NotFound(id.to_string()))?;
        let scan = self.scan_reference(&tracking.tracking_number);
        Ok((tracking, scan))
    }

    /// Status changes go through
    /// [`FulfillmentClient`](super::FulfillmentClient) so the order follows.
    #[instrument(skip(self))]
    pub(crate) async fn append_status(
        &self,
        id: TrackingId,
        update: StatusUpdate,
    ) -> Result<DeliveryTracking, TrackingError> {
        self.act(id, TrackingAction::AppendStatus(update)).await
    }

    #[instrument(skip(self))]
    pub(crate) async fn mark_delivered(
        &self,
        id: TrackingId,
        confirmation: DeliveryConfirmation,
        operator: OperatorId,
    ) -> Result<DeliveryTracking, TrackingError> {
        self.act(
            id,
            TrackingAction::MarkDelivered {
                confirmation,
                operator,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn attach_proof(
        &self,
        id: TrackingId,
        reference: String,
    ) -> Result<DeliveryTracking, TrackingError> {
        self.act(id, TrackingAction::AttachProof(reference)).await
    }

    /// Carrier, company and ETA corrections; refused once delivered.
    #[instrument(skip(self))]
    pub async fn update_details(
        &self,
        id: TrackingId,
        update: TrackingUpdate,
    ) -> Result<DeliveryTracking, TrackingError> {
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn find_by_number(
        &self,
        tracking_number: &str,
    ) -> Result<Option<DeliveryTracking>, TrackingError> {
        self.inner
            .lookup(tracking_number.trim().to_string())
            .await
            .map_err(Self::map_error)
    }

    /// The unauthenticated view. Unknown numbers are `NotFound`.
    #[instrument(skip(self))]
    pub async fn lookup_public(
        &self,
        tracking_number: &str,
    ) -> Result<PublicTrackingView, TrackingError> {
        match self.find_by_number(tracking_number).await? {
            Some(tracking) => Ok(PublicTrackingView::from(&tracking)),
            None => Err(TrackingError::NotFound(tracking_number.to_string())),
        }
    }

    /// Matching records, newest first, at most [`LIST_LIMIT`].
    #[instrument(skip(self))]
    pub async fn list_filtered(
        &self,
        filter: TrackingFilter,
    ) -> Result<Vec<DeliveryTracking>, TrackingError> {
        let mut records: Vec<DeliveryTracking> = self
            .list()
            .await?
            .into_iter()
            .filter(|t| filter.matches(t))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.0.cmp(&a.id.0)));
        records.truncate(LIST_LIMIT);
        Ok(records)
    }

    pub fn scan_reference(&self, tracking_number: &str) -> ScanReference {
        ScanReference::new(&self.public_base_url, tracking_number)
    }

    async fn act(
        &self,
        id: TrackingId,
        action: TrackingAction,
    ) -> Result<DeliveryTracking, TrackingError> {
        self.inner
            .perform_action(id, action)
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<DeliveryTracking> for TrackingClient {
    type Error = TrackingError;

    fn inner(&self) -> &ResourceClient<DeliveryTracking> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<TrackingError>() {
            Ok(entity) => entity,
            Err(FrameworkError::NotFound(id)) => TrackingError::NotFound(id),
            Err(FrameworkError::DuplicateKey(number)) => TrackingError::DuplicateNumber(number),
            Err(other) => TrackingError::ActorCommunicationError(other.to_string()),
        }
    }
}
