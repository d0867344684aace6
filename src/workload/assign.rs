//! Resolving who a task should be assigned to.
//!
//! Every operation that sets a task's assignee goes through
//! [`choose_assignee`] before anything is written.

use anyhow::Result;
use uuid::Uuid;

use super::capacity::{evaluate_assignment, find_best_member_for_task};
use super::{AssignmentDecision, RejectReason, WorkloadStore};
use crate::models::TeamMember;

/// What to do with a task's assignee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeChoice {
    /// Write this member as the assignee.
    Assign(TeamMember),
    /// Leave the task without an assignee.
    Unassigned,
    /// Do not write anything; hand the decision back to the caller.
    Blocked(AssignmentDecision),
}

/// Decide the assignee for a task in `team_id`.
///
/// - An explicit `requested` member is checked for existence, team
///   membership and capacity. `force` overrides only the capacity warning.
/// - With no request and `auto_assign`, the least-loaded member with room is
///   picked. If everyone is full the task stays unassigned.
pub fn choose_assignee<S: WorkloadStore + ?Sized>(
    store: &S,
    team_id: Uuid,
    requested: Option<Uuid>,
    auto_assign: bool,
    force: bool,
) -> Result<AssigneeChoice> {
    match requested {
        Some(member_id) => {
            let workload = store.member_workload(member_id)?;
            if workload
                .as_ref()
                .is_some_and(|w| w.member.team_id != team_id)
            {
                return Ok(AssigneeChoice::Blocked(AssignmentDecision::Rejected {
                    reason: RejectReason::MemberNotInTeam,
                }));
            }

            match evaluate_assignment(workload.as_ref(), force) {
                AssignmentDecision::Allowed { member, .. } => Ok(AssigneeChoice::Assign(member)),
                decision => Ok(AssigneeChoice::Blocked(decision)),
            }
        }
        None if auto_assign => {
            let choice = match find_best_member_for_task(store, team_id)? {
                Some(member) => {
                    tracing::debug!(member_id = %member.id, "Auto-assigning to least-loaded member");
                    AssigneeChoice::Assign(member)
                }
                None => {
                    tracing::info!(%team_id, "Every member is at capacity, leaving task unassigned");
                    AssigneeChoice::Unassigned
                }
            };
            Ok(choice)
        }
        None => Ok(AssigneeChoice::Unassigned),
    }
}
