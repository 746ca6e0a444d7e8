//! State transition logic
//!
//! Pure functions for checking and applying status transitions to proposals.

use crate::errors::{AbmixError, Result};
use crate::schemas::{ProposalRecord, ProposalStatus};

use super::states::can_transition;

/// Validate a transition against the workflow table.
///
/// # Returns
/// The target status when the edge exists
///
/// # Errors
/// * `InvalidTransition` - if `to` is not reachable from `from` in one step
pub fn validate_transition(from: ProposalStatus, to: ProposalStatus) -> Result<ProposalStatus> {
    if can_transition(from, to) {
        Ok(to)
    } else {
        Err(AbmixError::InvalidTransition { from, to })
    }
}

/// Pure function that moves a proposal to a new status.
///
/// Never mutates the input; returns a copy with the new status when the
/// transition is allowed.
pub fn apply_status_transition(
    proposal: &ProposalRecord,
    to: ProposalStatus,
) -> Result<ProposalRecord> {
    validate_transition(proposal.status, to)?;
    Ok(proposal.clone().with_status(to))
}
