//! The proposal draft store.
//!
//! A [`ProposalDraft`] holds the one in-flight proposal for the lifetime of
//! the "new proposal" wizard. It is constructed once when the wizard is
//! entered, passed by mutable reference into each step's handler, consumed
//! by [`ProposalDraft::finalize`] at the review step, and reset after a
//! successful send or when the wizard is abandoned. There is a single
//! logical writer (the user driving the wizard), so no concurrent-mutation
//! contract is needed.
//!
//! Subtotal, tax, and total are derived reads computed on demand from the
//! current services and tax rate; they are never stored, so they are always
//! consistent with the latest mutation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    CustomerSuggestion, NewProposal, PaymentTerms, PropertyType, ServiceItem,
};
use crate::pricing;

/// Photo cap enforced by the capture step. The store itself does not
/// enforce it; `add_photo` always appends.
pub const MAX_PHOTOS: usize = 10;

const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 0);
const DEFAULT_VALID_DAYS: &str = "30";

/// Step-transition validation failures. Navigation is blocked and no
/// mutation occurs when one of these is returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("customer name is required")]
    MissingCustomerName,

    #[error("at least one service must be selected")]
    NoServices,
}

/// Partial update written back by the customer-info step. `None` fields are
/// left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfoUpdate {
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub property_type: Option<PropertyType>,
}

/// Partial update written back by the review step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSettingsUpdate {
    pub tax_rate: Option<Decimal>,
    pub payment_terms: Option<PaymentTerms>,
    pub valid_days: Option<String>,
}

/// The in-progress, unpersisted proposal assembled across wizard steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub customer_address: String,
    pub property_type: Option<PropertyType>,

    /// Opaque image references in insertion order; the first photo is the
    /// cover image.
    pub photos: Vec<String>,
    pub services: Vec<ServiceItem>,

    /// Percentage in the expected range [0, 100]; not hard-enforced.
    pub tax_rate: Decimal,
    pub payment_terms: PaymentTerms,
    /// Integer string as typed by the user; parsed at finalize time.
    pub valid_days: String,
}

impl Default for ProposalDraft {
    fn default() -> Self {
        Self {
            customer_name: String::new(),
            customer_phone: String::new(),
            customer_email: String::new(),
            customer_address: String::new(),
            property_type: None,
            photos: Vec::new(),
            services: Vec::new(),
            tax_rate: DEFAULT_TAX_RATE,
            payment_terms: PaymentTerms::default(),
            valid_days: DEFAULT_VALID_DAYS.to_string(),
        }
    }
}

impl ProposalDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the given fields into the draft. No validation beyond type;
    /// always succeeds.
    pub fn update_customer_info(&mut self, update: CustomerInfoUpdate) {
        if let Some(name) = update.customer_name {
            self.customer_name = name;
        }
        if let Some(phone) = update.customer_phone {
            self.customer_phone = phone;
        }
        if let Some(email) = update.customer_email {
            self.customer_email = email;
        }
        if let Some(address) = update.customer_address {
            self.customer_address = address;
        }
        if let Some(property_type) = update.property_type {
            self.property_type = Some(property_type);
        }
    }

    /// Overwrites name, phone, and address from an autocomplete suggestion
    /// in one atomic update. Fields the suggestion does not carry (email,
    /// property type) are left untouched.
    pub fn apply_suggestion(&mut self, suggestion: &CustomerSuggestion) {
        self.customer_name = suggestion.name.clone();
        self.customer_phone = suggestion.phone.clone().unwrap_or_default();
        self.customer_address = suggestion.address.clone().unwrap_or_default();
    }

    /// Appends a photo reference. No dedup, no cap at this layer.
    pub fn add_photo(&mut self, photo: impl Into<String>) {
        self.photos.push(photo.into());
    }

    /// Removes the photo at `index`. Out-of-range indices are a no-op.
    pub fn remove_photo(&mut self, index: usize) {
        if index < self.photos.len() {
            self.photos.remove(index);
        }
    }

    /// Replaces the entire services sequence wholesale (step-level commit).
    pub fn update_services(&mut self, services: Vec<ServiceItem>) {
        self.services = services;
    }

    /// Merges tax/terms/valid-days fields from the review step.
    pub fn update_review_settings(&mut self, update: ReviewSettingsUpdate) {
        if let Some(tax_rate) = update.tax_rate {
            self.tax_rate = tax_rate;
        }
        if let Some(payment_terms) = update.payment_terms {
            self.payment_terms = payment_terms;
        }
        if let Some(valid_days) = update.valid_days {
            self.valid_days = valid_days;
        }
    }

    pub fn subtotal(&self) -> Decimal {
        pricing::subtotal(&self.services)
    }

    pub fn tax(&self) -> Decimal {
        pricing::tax(self.subtotal(), self.tax_rate)
    }

    pub fn total(&self) -> Decimal {
        let subtotal = self.subtotal();
        pricing::total(subtotal, pricing::tax(subtotal, self.tax_rate))
    }

    /// Gate for leaving the customer-info step.
    pub fn validate_customer_step(&self) -> Result<(), ValidationError> {
        if self.customer_name.trim().is_empty() {
            return Err(ValidationError::MissingCustomerName);
        }
        Ok(())
    }

    /// Gate for leaving the services step.
    pub fn validate_services_step(&self) -> Result<(), ValidationError> {
        if self.services.is_empty() {
            return Err(ValidationError::NoServices);
        }
        Ok(())
    }

    /// Validates the draft and assembles the insert record with pricing
    /// computed from the current services and tax rate.
    ///
    /// The draft itself is not consumed: callers reset it only after the
    /// hand-off to persistence succeeds, so a failed send can be retried
    /// without re-entering anything.
    pub fn finalize(&self) -> Result<NewProposal, ValidationError> {
        self.validate_customer_step()?;
        self.validate_services_step()?;

        let subtotal = self.subtotal();
        let total = pricing::total(subtotal, pricing::tax(subtotal, self.tax_rate));

        Ok(NewProposal {
            customer_name: self.customer_name.trim().to_string(),
            customer_phone: non_empty(&self.customer_phone),
            customer_email: non_empty(&self.customer_email),
            customer_address: non_empty(&self.customer_address),
            property_type: self.property_type,
            services: self.services.clone(),
            photos: self.photos.clone(),
            subtotal,
            tax_rate: self.tax_rate,
            total,
            payment_terms: self.payment_terms,
            valid_days: self.valid_days.trim().parse().unwrap_or(30),
        })
    }

    /// Restores the draft to its default empty value.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn service(name: &str, price: Decimal) -> ServiceItem {
        ServiceItem::new(name, price)
    }

    #[test]
    fn default_draft_matches_wizard_defaults() {
        let draft = ProposalDraft::new();

        assert_eq!(draft.customer_name, "");
        assert_eq!(draft.services, vec![]);
        assert_eq!(draft.photos, Vec::<String>::new());
        assert_eq!(draft.tax_rate, dec!(8));
        assert_eq!(draft.payment_terms, PaymentTerms::FiftyFifty);
        assert_eq!(draft.valid_days, "30");
    }

    #[test]
    fn update_customer_info_merges_only_given_fields() {
        let mut draft = ProposalDraft::new();
        draft.update_customer_info(CustomerInfoUpdate {
            customer_email: Some("a@b.com".to_string()),
            ..Default::default()
        });

        draft.update_customer_info(CustomerInfoUpdate {
            customer_name: Some("Jane Doe".to_string()),
            ..Default::default()
        });

        assert_eq!(draft.customer_name, "Jane Doe");
        assert_eq!(draft.customer_email, "a@b.com");
    }

    #[test]
    fn wizard_scenario_computes_expected_totals() {
        let mut draft = ProposalDraft::new();
        draft.update_customer_info(CustomerInfoUpdate {
            customer_name: Some("Jane Doe".to_string()),
            ..Default::default()
        });
        draft.update_services(vec![
            service("Roof Inspection", dec!(150)),
            service("Gutter Cleaning", dec!(300)),
        ]);
        draft.update_review_settings(ReviewSettingsUpdate {
            tax_rate: Some(dec!(8)),
            ..Default::default()
        });

        assert_eq!(draft.subtotal(), dec!(450));
        assert_eq!(draft.tax(), dec!(36));
        assert_eq!(draft.total(), dec!(486));
    }

    #[test]
    fn update_services_is_idempotent() {
        let services = vec![service("Roof Inspection", dec!(150))];
        let mut draft = ProposalDraft::new();

        draft.update_services(services.clone());
        let once = (draft.subtotal(), draft.total());

        draft.update_services(services);
        assert_eq!((draft.subtotal(), draft.total()), once);
    }

    #[test]
    fn mutating_services_invalidates_previous_totals() {
        let mut draft = ProposalDraft::new();
        draft.update_services(vec![service("Roof Inspection", dec!(150))]);
        assert_eq!(draft.subtotal(), dec!(150));

        draft.update_services(vec![service("Roof Inspection", dec!(200))]);
        assert_eq!(draft.subtotal(), dec!(200));
    }

    #[test]
    fn add_then_remove_photo_restores_sequence() {
        let mut draft = ProposalDraft::new();
        draft.add_photo("photo-1");
        draft.add_photo("photo-2");
        let before = draft.photos.clone();

        draft.add_photo("photo-3");
        draft.remove_photo(2);

        assert_eq!(draft.photos, before);
    }

    #[test]
    fn remove_photo_out_of_range_is_noop() {
        let mut draft = ProposalDraft::new();
        draft.add_photo("photo-1");

        draft.remove_photo(5);

        assert_eq!(draft.photos, vec!["photo-1".to_string()]);
    }

    #[test]
    fn photos_keep_insertion_order() {
        let mut draft = ProposalDraft::new();
        draft.add_photo("cover");
        draft.add_photo("detail");
        draft.remove_photo(1);
        draft.add_photo("after");

        assert_eq!(draft.photos, vec!["cover".to_string(), "after".to_string()]);
    }

    #[test]
    fn apply_suggestion_overwrites_contact_fields_and_keeps_email() {
        let mut draft = ProposalDraft::new();
        draft.update_customer_info(CustomerInfoUpdate {
            customer_email: Some("a@b.com".to_string()),
            ..Default::default()
        });

        draft.apply_suggestion(&CustomerSuggestion {
            name: "Johnson Family".to_string(),
            phone: Some("(555) 345-6789".to_string()),
            address: Some("89 Pine Ave".to_string()),
        });

        assert_eq!(draft.customer_name, "Johnson Family");
        assert_eq!(draft.customer_phone, "(555) 345-6789");
        assert_eq!(draft.customer_address, "89 Pine Ave");
        assert_eq!(draft.customer_email, "a@b.com");
    }

    #[test]
    fn reset_restores_defaults() {
        let mut draft = ProposalDraft::new();
        draft.update_customer_info(CustomerInfoUpdate {
            customer_name: Some("Jane Doe".to_string()),
            ..Default::default()
        });
        draft.update_services(vec![service("Roof Inspection", dec!(150))]);
        draft.update_review_settings(ReviewSettingsUpdate {
            tax_rate: Some(dec!(10)),
            ..Default::default()
        });

        draft.reset();

        assert_eq!(draft, ProposalDraft::default());
        assert_eq!(draft.customer_name, "");
        assert_eq!(draft.services, vec![]);
        assert_eq!(draft.tax_rate, dec!(8));
    }

    #[test]
    fn validate_customer_step_rejects_blank_name() {
        let mut draft = ProposalDraft::new();
        assert_eq!(
            draft.validate_customer_step(),
            Err(ValidationError::MissingCustomerName)
        );

        draft.customer_name = "   ".to_string();
        assert_eq!(
            draft.validate_customer_step(),
            Err(ValidationError::MissingCustomerName)
        );

        draft.customer_name = "Jane Doe".to_string();
        assert_eq!(draft.validate_customer_step(), Ok(()));
    }

    #[test]
    fn validate_services_step_requires_a_selection() {
        let mut draft = ProposalDraft::new();
        assert_eq!(
            draft.validate_services_step(),
            Err(ValidationError::NoServices)
        );

        draft.update_services(vec![service("Roof Inspection", dec!(150))]);
        assert_eq!(draft.validate_services_step(), Ok(()));
    }

    #[test]
    fn finalize_snapshots_pricing_and_normalizes_fields() {
        let mut draft = ProposalDraft::new();
        draft.update_customer_info(CustomerInfoUpdate {
            customer_name: Some("Jane Doe".to_string()),
            customer_phone: Some(String::new()),
            ..Default::default()
        });
        draft.update_services(vec![
            service("Roof Inspection", dec!(150)),
            service("Gutter Cleaning", dec!(300)),
        ]);

        let new_proposal = draft.finalize().expect("draft should be valid");

        assert_eq!(new_proposal.customer_name, "Jane Doe");
        assert_eq!(new_proposal.customer_phone, None);
        assert_eq!(new_proposal.subtotal, dec!(450));
        assert_eq!(new_proposal.total, dec!(486));
        assert_eq!(new_proposal.valid_days, 30);
    }

    #[test]
    fn finalize_rejects_invalid_drafts_without_mutation() {
        let mut draft = ProposalDraft::new();
        draft.update_services(vec![service("Roof Inspection", dec!(150))]);
        let before = draft.clone();

        assert_eq!(draft.finalize(), Err(ValidationError::MissingCustomerName));
        assert_eq!(draft, before);
    }

    #[test]
    fn finalize_falls_back_to_thirty_valid_days_on_garbage_input() {
        let mut draft = ProposalDraft::new();
        draft.customer_name = "Jane Doe".to_string();
        draft.update_services(vec![service("Roof Inspection", dec!(150))]);
        draft.update_review_settings(ReviewSettingsUpdate {
            valid_days: Some("soon".to_string()),
            ..Default::default()
        });

        let new_proposal = draft.finalize().expect("draft should be valid");

        assert_eq!(new_proposal.valid_days, 30);
    }
}
