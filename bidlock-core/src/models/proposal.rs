use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PaymentTerms, PropertyType, ProposalStatus, ServiceItem};

/// A persisted proposal record.
///
/// `subtotal` and `total` are snapshots of the pricing computed at the
/// moment the draft was finalized; `photos` keeps insertion order and the
/// first entry is the cover image. `signature` is the opaque encoded image
/// captured on the signing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: i64,

    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub property_type: Option<PropertyType>,

    pub services: Vec<ServiceItem>,
    pub photos: Vec<String>,

    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub total: Decimal,

    pub payment_terms: PaymentTerms,
    pub valid_days: i32,

    pub status: ProposalStatus,
    pub signature: Option<String>,

    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub signed_at: Option<DateTime<Utc>>,
}

/// For creating new proposals (no id, timestamps, or signature yet).
///
/// Records always enter the store as [`ProposalStatus::Draft`]; the send
/// workflow moves them to `Sent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProposal {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub property_type: Option<PropertyType>,
    pub services: Vec<ServiceItem>,
    pub photos: Vec<String>,
    pub subtotal: Decimal,
    pub tax_rate: Decimal,
    pub total: Decimal,
    pub payment_terms: PaymentTerms,
    pub valid_days: i32,
}
