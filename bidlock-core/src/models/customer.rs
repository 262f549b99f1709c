use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Proposal;

/// Read-only autocomplete record for the customer-info step.
///
/// Suggestions are not persisted on their own; they are derived from prior
/// proposals, grouped by customer name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSuggestion {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CustomerSuggestion {
    pub fn from_proposal(proposal: &Proposal) -> Self {
        Self {
            name: proposal.customer_name.clone(),
            phone: proposal.customer_phone.clone(),
            address: proposal.customer_address.clone(),
        }
    }
}

/// Per-customer rollup shown on the customers list and detail pages.
///
/// Contact details come from the customer's first proposal; `total_value`
/// sums the totals of every proposal under that exact name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub proposal_count: usize,
    pub total_value: Decimal,
}

/// Groups proposals by exact customer name, preserving first-seen order.
pub fn summarize_customers(proposals: &[Proposal]) -> Vec<CustomerSummary> {
    let mut summaries: Vec<CustomerSummary> = Vec::new();
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();

    for proposal in proposals {
        match index_by_name.get(proposal.customer_name.as_str()) {
            Some(&i) => {
                let summary = &mut summaries[i];
                summary.proposal_count += 1;
                summary.total_value += proposal.total;
            }
            None => {
                index_by_name.insert(proposal.customer_name.as_str(), summaries.len());
                summaries.push(CustomerSummary {
                    name: proposal.customer_name.clone(),
                    phone: proposal.customer_phone.clone(),
                    email: proposal.customer_email.clone(),
                    address: proposal.customer_address.clone(),
                    proposal_count: 1,
                    total_value: proposal.total,
                });
            }
        }
    }

    summaries
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::{PaymentTerms, ProposalStatus, ServiceItem};

    fn proposal(id: i64, name: &str, total: Decimal) -> Proposal {
        Proposal {
            id,
            customer_name: name.to_string(),
            customer_phone: Some("(555) 111-2222".to_string()),
            customer_email: None,
            customer_address: Some("1 Main St".to_string()),
            property_type: None,
            services: vec![ServiceItem::new("Roof Inspection", total)],
            photos: vec![],
            subtotal: total,
            tax_rate: dec!(0),
            total,
            payment_terms: PaymentTerms::default(),
            valid_days: 30,
            status: ProposalStatus::Sent,
            signature: None,
            created_at: Utc::now(),
            sent_at: None,
            signed_at: None,
        }
    }

    #[test]
    fn summarize_groups_by_name_in_first_seen_order() {
        let proposals = vec![
            proposal(1, "John Martinez", dec!(100)),
            proposal(2, "Sarah Johnson", dec!(250)),
            proposal(3, "John Martinez", dec!(50)),
        ];

        let summaries = summarize_customers(&proposals);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].name, "John Martinez");
        assert_eq!(summaries[0].proposal_count, 2);
        assert_eq!(summaries[0].total_value, dec!(150));
        assert_eq!(summaries[1].name, "Sarah Johnson");
        assert_eq!(summaries[1].proposal_count, 1);
        assert_eq!(summaries[1].total_value, dec!(250));
    }

    #[test]
    fn summarize_takes_contact_details_from_first_proposal() {
        let mut first = proposal(1, "John Martinez", dec!(100));
        first.customer_phone = Some("(555) 123-4567".to_string());
        let mut second = proposal(2, "John Martinez", dec!(50));
        second.customer_phone = Some("(555) 999-0000".to_string());

        let summaries = summarize_customers(&[first, second]);

        assert_eq!(summaries[0].phone.as_deref(), Some("(555) 123-4567"));
    }

    #[test]
    fn summarize_empty_input_is_empty() {
        assert_eq!(summarize_customers(&[]), vec![]);
    }
}
