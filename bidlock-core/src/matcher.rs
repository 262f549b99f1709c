//! Customer autocomplete matching for the customer-info step.

use crate::models::{CustomerSuggestion, Proposal};

/// Minimum typed length before suggestions activate.
pub const MIN_QUERY_LEN: usize = 2;

/// Returns the candidates whose name contains `query`, case-insensitively.
///
/// Matching only activates once the query is at least [`MIN_QUERY_LEN`]
/// characters; shorter queries yield an empty list and the suggestion UI
/// stays hidden. Results preserve the candidate list's original order, with
/// no ranking by match quality.
pub fn suggest<'a>(
    query: &str,
    candidates: &'a [CustomerSuggestion],
) -> Vec<&'a CustomerSuggestion> {
    if query.chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    candidates
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}

/// Derives the autocomplete candidate list from prior proposals, grouped by
/// customer name. The first proposal seen for a name supplies its contact
/// details; order follows first appearance in the input.
pub fn suggestions_from_proposals(proposals: &[Proposal]) -> Vec<CustomerSuggestion> {
    let mut suggestions: Vec<CustomerSuggestion> = Vec::new();

    for proposal in proposals {
        if suggestions.iter().any(|s| s.name == proposal.customer_name) {
            continue;
        }
        suggestions.push(CustomerSuggestion::from_proposal(proposal));
    }

    suggestions
}
