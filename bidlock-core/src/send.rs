//! The send workflow: hand a stored proposal to the customer for signing.
//!
//! Sending is the one place the draft wizard touches external
//! collaborators. The flow is load, email the signing link, then mark the
//! record sent. A delivery failure leaves the proposal status untouched so
//! the user can retry the action; no automatic retry or backoff is
//! performed here.

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::db::{ProposalRepository, RepositoryError};
use crate::models::Proposal;

#[derive(Debug, Error)]
pub enum MailerError {
    /// Opaque error payload from the delivery provider.
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("proposal has no customer email address")]
    MissingRecipient,

    #[error(transparent)]
    Mailer(#[from] MailerError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Everything the notification collaborator needs to deliver a signing
/// request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningRequest {
    pub recipient: String,
    pub proposal_id: i64,
    pub customer_name: String,
    pub business_name: String,
    pub signing_link: String,
}

/// Outbound email/notification boundary.
#[async_trait]
pub trait ProposalMailer: Send + Sync {
    async fn send_signing_request(&self, request: &SigningRequest) -> Result<(), MailerError>;
}

/// Builds the public signing-page URL: `<base>/sign/<id>`.
pub fn signing_link(app_base_url: &str, proposal_id: i64) -> String {
    format!("{}/sign/{}", app_base_url.trim_end_matches('/'), proposal_id)
}

/// Sends the signing request for a stored proposal and marks it sent.
///
/// Returns the refreshed record on success. On any failure the stored
/// status is left as it was, so the caller can surface the error and let
/// the user retry without losing the draft.
pub async fn send_proposal<R, M>(
    repo: &R,
    mailer: &M,
    app_base_url: &str,
    business_name: &str,
    proposal_id: i64,
) -> Result<Proposal, SendError>
where
    R: ProposalRepository + ?Sized,
    M: ProposalMailer + ?Sized,
{
    let proposal = repo.get_proposal(proposal_id).await?;

    let recipient = proposal
        .customer_email
        .clone()
        .ok_or(SendError::MissingRecipient)?;

    let request = SigningRequest {
        recipient,
        proposal_id,
        customer_name: proposal.customer_name.clone(),
        business_name: business_name.to_string(),
        signing_link: signing_link(app_base_url, proposal_id),
    };

    if let Err(e) = mailer.send_signing_request(&request).await {
        warn!(proposal_id, error = %e, "signing request delivery failed");
        return Err(e.into());
    }

    repo.mark_sent(proposal_id, Utc::now()).await?;
    info!(proposal_id, recipient = %request.recipient, "proposal sent");

    repo.get_proposal(proposal_id).await.map_err(SendError::from)
}
