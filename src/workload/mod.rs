//! Capacity-aware assignment and workload rebalancing.
//!
//! Two pieces of decision logic live here:
//!
//! - [`capacity`]: how loaded a member is, and whether a new assignment to
//!   them should be allowed, warned about, or rejected.
//! - [`rebalance`]: the sweep that moves excess low-priority tasks from
//!   overloaded members to the least-loaded members of the same team.
//!
//! [`assign`] ties the evaluator to task creation and updates. Everything
//! reads and writes through [`WorkloadStore`], which the SQLite
//! [`Database`](crate::db::Database) implements.

pub mod assign;
pub mod capacity;
pub mod rebalance;

pub use assign::{choose_assignee, AssigneeChoice};
pub use capacity::{
    best_member_for_assignment, current_load, evaluate_assignment, find_best_member_for_task,
    is_over_capacity, load_summary, members_with_spare_capacity, validate_member_assignment,
    AssignmentDecision, RejectReason,
};
pub use rebalance::{plan_sweep, plan_team, PlannedMove, Reassignment, Rebalancer, SweepError, SweepReport};

use anyhow::Result;
use uuid::Uuid;

use crate::models::{ActivityLog, CreateActivityInput, MemberWorkload, TeamWorkload};

/// Persistence operations the workload engine depends on.
///
/// Reads only ever return tasks that are not done. Writes are single-row and
/// individually atomic; nothing here spans a transaction.
pub trait WorkloadStore {
    /// A team's members with their open tasks, or `None` if the team does not exist.
    fn team_workload(&self, team_id: Uuid) -> Result<Option<TeamWorkload>>;

    /// A single member with their open tasks, or `None` if the member does not exist.
    fn member_workload(&self, member_id: Uuid) -> Result<Option<MemberWorkload>>;

    /// Every team, ordered by name, each with its members' open tasks.
    fn all_team_workloads(&self) -> Result<Vec<TeamWorkload>>;

    /// Move `task_id` from `from` to `to`.
    ///
    /// Returns `false` without writing when the task is no longer assigned to
    /// `from`, or when `to` has no room left, so a move planned from a stale
    /// snapshot cannot clobber a concurrent change or overfill the target.
    fn reassign_task(&self, task_id: Uuid, from: Uuid, to: Uuid) -> Result<bool>;

    /// Append an audit entry.
    fn record_activity(&self, input: CreateActivityInput) -> Result<ActivityLog>;
}
