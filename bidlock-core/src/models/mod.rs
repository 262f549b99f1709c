mod customer;
mod payment_terms;
mod property_type;
mod proposal;
mod service;
mod status;

pub use customer::{CustomerSuggestion, CustomerSummary, summarize_customers};
pub use payment_terms::PaymentTerms;
pub use property_type::PropertyType;
pub use proposal::{NewProposal, Proposal};
pub use service::ServiceItem;
pub use status::ProposalStatus;
