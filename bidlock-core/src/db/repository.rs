use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{NewProposal, Proposal, ProposalStatus};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Connection error: {0}")]
    Connection(String),
}

/// Persistence boundary for proposals.
///
/// New records always enter as [`ProposalStatus::Draft`]; the dedicated
/// transition methods move them through the lifecycle. `set_status` is the
/// manual escape hatch for transitions with no in-flow trigger (declining).
#[async_trait]
pub trait ProposalRepository: Send + Sync {
    async fn create_proposal(&self, proposal: NewProposal) -> Result<Proposal, RepositoryError>;

    async fn get_proposal(&self, id: i64) -> Result<Proposal, RepositoryError>;

    /// Lists proposals, most recent first, optionally filtered by status.
    async fn list_proposals(
        &self,
        status: Option<ProposalStatus>,
    ) -> Result<Vec<Proposal>, RepositoryError>;

    async fn list_proposals_for_customer(
        &self,
        customer_name: &str,
    ) -> Result<Vec<Proposal>, RepositoryError>;

    /// Marks a proposal as sent, recording when the notification went out.
    async fn mark_sent(&self, id: i64, sent_at: DateTime<Utc>) -> Result<(), RepositoryError>;

    /// Stores the captured signature and moves the proposal to accepted.
    async fn record_signature(
        &self,
        id: i64,
        signature: &str,
        signed_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;

    async fn set_status(&self, id: i64, status: ProposalStatus) -> Result<(), RepositoryError>;

    /// Deletes every proposal under the given customer name, returning the
    /// number of rows removed.
    async fn delete_proposals_for_customer(
        &self,
        customer_name: &str,
    ) -> Result<u64, RepositoryError>;
}
