use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named, priced line item within a proposal.
///
/// Line items keep their insertion order and duplicates by name are
/// permitted. Prices are expected to be non-negative; negative values are
/// clamped to zero when summed (see the pricing module).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
}

impl ServiceItem {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
        }
    }
}
