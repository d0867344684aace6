//! Load and capacity checks for individual assignments.
//!
//! A member is *over capacity* once their open-task count reaches their
//! capacity: capacity is the most open tasks they should hold, so a member
//! sitting exactly at it cannot take another one without a warning.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WorkloadStore;
use crate::models::{MemberLoad, MemberWorkload, TeamMember, TeamWorkload};

/// Number of the member's tasks that are not done.
pub fn current_load(member: &MemberWorkload) -> usize {
    member.current_load()
}

/// `true` when the member's load has reached (or passed) their capacity.
pub fn is_over_capacity(member: &MemberWorkload) -> bool {
    member.current_load() >= member.capacity()
}

/// Members that can still take a task, least loaded first.
///
/// The sort is stable, so members with equal load keep the team's order.
pub fn members_with_spare_capacity(team: &TeamWorkload) -> Vec<&MemberWorkload> {
    let mut spare: Vec<&MemberWorkload> = team
        .members
        .iter()
        .filter(|m| !is_over_capacity(m))
        .collect();
    spare.sort_by_key(|m| m.current_load());
    spare
}

/// The member a new task should default to, if anyone has room.
pub fn best_member_for_assignment(team: &TeamWorkload) -> Option<&MemberWorkload> {
    members_with_spare_capacity(team).into_iter().next()
}

/// Why an assignment cannot happen at all.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    MemberNotFound,
    MemberNotInTeam,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MemberNotFound => "member_not_found",
            Self::MemberNotInTeam => "member_not_in_team",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of checking a proposed assignment.
///
/// Serialized with a `decision` tag so callers branch on one field:
///
/// ```json
/// {"decision": "warned", "message": "...", "current_load": 3, "capacity": 3}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AssignmentDecision {
    /// The assignment may go ahead.
    Allowed {
        member: TeamMember,
        current_load: usize,
        capacity: usize,
    },
    /// The member is at or over capacity. Re-submit with `force` once a
    /// person has confirmed.
    Warned {
        message: String,
        current_load: usize,
        capacity: usize,
    },
    /// The assignment cannot happen.
    Rejected { reason: RejectReason },
}

impl AssignmentDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Classify assigning one more task to `member`.
///
/// `force` only overrides the capacity warning; a missing member is always
/// rejected.
pub fn evaluate_assignment(member: Option<&MemberWorkload>, force: bool) -> AssignmentDecision {
    let Some(workload) = member else {
        return AssignmentDecision::Rejected {
            reason: RejectReason::MemberNotFound,
        };
    };

    let current_load = workload.current_load();
    let capacity = workload.capacity();

    if force || !is_over_capacity(workload) {
        return AssignmentDecision::Allowed {
            member: workload.member.clone(),
            current_load,
            capacity,
        };
    }

    AssignmentDecision::Warned {
        message: format!(
            "{} already has {} open task(s) and a capacity of {}. Assign anyway?",
            workload.member.name, current_load, capacity
        ),
        current_load,
        capacity,
    }
}

/// Look the member up and classify assigning them one more task.
pub fn validate_member_assignment<S: WorkloadStore + ?Sized>(
    store: &S,
    member_id: Uuid,
    force: bool,
) -> Result<AssignmentDecision> {
    let workload = store.member_workload(member_id)?;
    let decision = evaluate_assignment(workload.as_ref(), force);

    if let AssignmentDecision::Warned {
        current_load,
        capacity,
        ..
    } = &decision
    {
        tracing::debug!(%member_id, current_load, capacity, "assignment would exceed capacity");
    }

    Ok(decision)
}

/// The least-loaded member of `team_id` with room for another task.
///
/// Returns `None` when the team does not exist or everyone is full.
pub fn find_best_member_for_task<S: WorkloadStore + ?Sized>(
    store: &S,
    team_id: Uuid,
) -> Result<Option<TeamMember>> {
    let Some(team) = store.team_workload(team_id)? else {
        return Ok(None);
    };
    Ok(best_member_for_assignment(&team).map(|m| m.member.clone()))
}

/// Per-member load figures for a team, in team order.
pub fn load_summary(team: &TeamWorkload) -> Vec<MemberLoad> {
    team.members
        .iter()
        .map(|m| MemberLoad {
            member_id: m.member.id,
            name: m.member.name.clone(),
            current_load: m.current_load(),
            capacity: m.capacity(),
            over_capacity: is_over_capacity(m),
        })
        .collect()
}
