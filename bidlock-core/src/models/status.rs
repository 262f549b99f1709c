use serde::{Deserialize, Serialize};

/// Lifecycle state of a persisted proposal.
///
/// The only transitions wired into the application flow are
/// `Draft -> Sent` (the send action) and `Sent -> Accepted` (the customer
/// signs). `Sent -> Declined` exists at the storage layer but has no
/// in-flow trigger; it is an external, manual transition. No transition
/// is reversible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Draft,
    Sent,
    Accepted,
    Declined,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Sent => "sent",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(Self::Draft),
            "sent" => Some(Self::Sent),
            "accepted" => Some(Self::Accepted),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }

    /// Whether moving from `self` to `next` is a legal lifecycle step.
    pub fn can_transition_to(&self, next: ProposalStatus) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Sent)
                | (Self::Sent, Self::Accepted)
                | (Self::Sent, Self::Declined)
        )
    }

    /// Statuses that appear in exported reports.
    pub fn is_exportable(&self) -> bool {
        matches!(self, Self::Sent | Self::Accepted)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_round_trips_every_status() {
        for status in [
            ProposalStatus::Draft,
            ProposalStatus::Sent,
            ProposalStatus::Accepted,
            ProposalStatus::Declined,
        ] {
            assert_eq!(ProposalStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert_eq!(ProposalStatus::parse("archived"), None);
    }

    #[test]
    fn draft_can_only_move_to_sent() {
        assert!(ProposalStatus::Draft.can_transition_to(ProposalStatus::Sent));
        assert!(!ProposalStatus::Draft.can_transition_to(ProposalStatus::Accepted));
        assert!(!ProposalStatus::Draft.can_transition_to(ProposalStatus::Declined));
    }

    #[test]
    fn sent_can_move_to_accepted_or_declined() {
        assert!(ProposalStatus::Sent.can_transition_to(ProposalStatus::Accepted));
        assert!(ProposalStatus::Sent.can_transition_to(ProposalStatus::Declined));
        assert!(!ProposalStatus::Sent.can_transition_to(ProposalStatus::Draft));
    }

    #[test]
    fn terminal_statuses_have_no_transitions() {
        for next in [
            ProposalStatus::Draft,
            ProposalStatus::Sent,
            ProposalStatus::Accepted,
            ProposalStatus::Declined,
        ] {
            assert!(!ProposalStatus::Accepted.can_transition_to(next));
            assert!(!ProposalStatus::Declined.can_transition_to(next));
        }
    }
}
