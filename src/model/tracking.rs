//! Delivery tracking records.
//!
//! A [`DeliveryTracking`] is one physical shipment. Its `history` is an
//! append-only log and `shipping_status` always mirrors the last entry; the
//! rules that keep it that way live in
//! [`tracking_actor`](crate::tracking_actor).

use crate::model::{OperatorId, OrderId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for tracking records.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackingId(pub u32);

impl From<u32> for TrackingId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for TrackingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tracking_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShippingStatus {
    Preparing,
    PickedUp,
    InTransit,
    OutForDelivery,
    Delivered,
    Exception,
    Returned,
}

impl ShippingStatus {
    pub fn label(self) -> &'static str {
        match self {
            ShippingStatus::Preparing => "Preparing",
            ShippingStatus::PickedUp => "Picked Up",
            ShippingStatus::InTransit => "In Transit",
            ShippingStatus::OutForDelivery => "Out for Delivery",
            ShippingStatus::Delivered => "Delivered",
            ShippingStatus::Exception => "Exception",
            ShippingStatus::Returned => "Returned",
        }
    }
}

impl Display for ShippingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Carrier {
    Dhl,
    Ups,
    FedEx,
    Usps,
    IsraelPost,
    Tnt,
    Aramex,
    #[default]
    Other,
}

impl Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Carrier::Dhl => "DHL",
            Carrier::Ups => "UPS",
            Carrier::FedEx => "FedEx",
            Carrier::Usps => "USPS",
            Carrier::IsraelPost => "Israel Post",
            Carrier::Tnt => "TNT",
            Carrier::Aramex => "Aramex",
            Carrier::Other => "Other",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeliveryAddress {
    pub recipient: String,
    pub street: String,
    pub city: String,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub status: ShippingStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub updated_by: Option<OperatorId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryTracking {
    pub id: TrackingId,
    /// Weak back-reference; the tracking record never loads the order.
    pub order_id: OrderId,
    pub tracking_number: String,
    pub shipping_status: ShippingStatus,
    pub carrier: Carrier,
    pub shipping_company: Option<String>,
    pub current_location: Option<String>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub actual_delivery_date: Option<DateTime<Utc>>,
    pub delivery_address: Option<DeliveryAddress>,
    pub history: Vec<HistoryEntry>,
    pub delivery_proof: Option<String>,
    pub signature: Option<String>,
    pub delivery_notes: Option<String>,
    pub created_by: OperatorId,
    pub created_at: DateTime<Utc>,
}

impl DeliveryTracking {
    pub fn is_delivered(&self) -> bool {
        self.shipping_status == ShippingStatus::Delivered
    }

    pub fn last_entry(&self) -> Option<&HistoryEntry> {
        self.history.last()
    }
}

/// What the operator supplies when a shipment is handed over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingDetails {
    /// Number printed by the carrier. Generated when absent.
    pub tracking_number: Option<String>,
    pub carrier: Carrier,
    pub shipping_company: Option<String>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    /// Falls back to the order's shipping address when absent.
    pub delivery_address: Option<DeliveryAddress>,
    pub notes: Option<String>,
}

/// Payload for creating a tracking record. Built by the order actor once the
/// order is ready to ship.
#[derive(Debug, Clone)]
pub struct TrackingCreate {
    pub order_id: OrderId,
    pub tracking_number: String,
    pub details: ShippingDetails,
    pub created_by: OperatorId,
}

/// Corrections to carrier data that don't touch the history.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackingUpdate {
    pub carrier: Option<Carrier>,
    pub shipping_company: Option<String>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
}

/// One status report from the operator or the courier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: ShippingStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub operator: OperatorId,
}

impl StatusUpdate {
    pub fn new(status: ShippingStatus, operator: OperatorId) -> Self {
        Self {
            status,
            location: None,
            notes: None,
            operator,
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Proof collected at the door.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryConfirmation {
    pub proof: Option<String>,
    pub signature: Option<String>,
    pub notes: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingFilter {
    pub status: Option<ShippingStatus>,
    pub carrier: Option<Carrier>,
}

impl TrackingFilter {
    pub fn matches(&self, tracking: &DeliveryTracking) -> bool {
        self.status.map_or(true, |s| s == tracking.shipping_status)
            && self.carrier.map_or(true, |c| c == tracking.carrier)
    }
}

/// The scannable artifact handed to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReference {
    pub tracking_number: String,
    pub url: String,
}

impl ScanReference {
    pub fn new(base_url: &str, tracking_number: &str) -> Self {
        Self {
            tracking_number: tracking_number.to_string(),
            url: format!("{}/track/{}", base_url.trim_end_matches('/'), tracking_number),
        }
    }
}

/// History entry as shown to anonymous visitors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicHistoryEntry {
    pub status: ShippingStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// What a tracking number unlocks: shipment data only, never the order,
/// customer, pricing or operator ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicTrackingView {
    pub tracking_number: String,
    pub shipping_status: ShippingStatus,
    pub carrier: Carrier,
    pub shipping_company: Option<String>,
    pub current_location: Option<String>,
    pub estimated_delivery_date: Option<DateTime<Utc>>,
    pub actual_delivery_date: Option<DateTime<Utc>>,
    pub delivery_address: Option<DeliveryAddress>,
    pub history: Vec<PublicHistoryEntry>,
    pub delivery_proof: Option<String>,
    pub signature: Option<String>,
}

impl From<&DeliveryTracking> for PublicTrackingView {
    fn from(t: &DeliveryTracking) -> Self {
        Self {
            tracking_number: t.tracking_number.clone(),
            shipping_status: t.shipping_status,
            carrier: t.carrier,
            shipping_company: t.shipping_company.clone(),
            current_location: t.current_location.clone(),
            estimated_delivery_date: t.estimated_delivery_date,
            actual_delivery_date: t.actual_delivery_date,
            delivery_address: t.delivery_address.clone(),
            history: t
                .history
                .iter()
                .map(|entry| PublicHistoryEntry {
                    status: entry.status,
                    location: entry.location.clone(),
                    notes: entry.notes.clone(),
                    timestamp: entry.timestamp,
                })
                .collect(),
            delivery_proof: t.delivery_proof.clone(),
            signature: t.signature.clone(),
        }
    }
}
