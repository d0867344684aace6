//! The rebalancing sweep.
//!
//! A member is *overloaded* when their open-task count is strictly greater
//! than their capacity. This is a different threshold from
//! [`is_over_capacity`](super::is_over_capacity): new work is refused once a
//! member reaches capacity, but the sweep only takes away work that is
//! actually in excess of it.
//!
//! For each team, in order:
//!
//! 1. Members with spare room (load < capacity) are ranked least loaded
//!    first. The ranking is computed once per team.
//! 2. Each overloaded member sheds up to `load - capacity` tasks, LOW before
//!    MEDIUM. HIGH tasks never move.
//! 3. Every task goes to the first ranked member still below capacity,
//!    counting moves already made in this sweep. When nobody has room the
//!    member keeps the rest.
//!
//! Sweeps are serialized by [`Rebalancer`]; the snapshot is taken only after
//! the sweep lock is held.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::WorkloadStore;
use crate::models::{
    CreateActivityInput, MemberWorkload, OpenTask, TaskPriority, TeamWorkload,
    ACTION_TASK_REASSIGNED,
};

/// A move the sweep intends to make.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlannedMove {
    pub task_id: Uuid,
    pub task_title: String,
    pub from_member_id: Uuid,
    pub from_member: String,
    pub to_member_id: Uuid,
    pub to_member: String,
    pub team_id: Uuid,
    pub team_name: String,
}

/// A move the sweep actually made.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reassignment {
    pub task_id: Uuid,
    pub task_title: String,
    pub from_member: String,
    pub to_member: String,
    pub team_name: String,
}

impl From<PlannedMove> for Reassignment {
    fn from(planned: PlannedMove) -> Self {
        Self {
            task_id: planned.task_id,
            task_title: planned.task_title,
            from_member: planned.from_member,
            to_member: planned.to_member,
            team_name: planned.team_name,
        }
    }
}

/// Summary of one sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SweepReport {
    pub message: String,
    pub reassignments: Vec<Reassignment>,
}

impl SweepReport {
    fn new(reassignments: Vec<Reassignment>) -> Self {
        let message = match reassignments.len() {
            0 => "No tasks needed reassigning".to_string(),
            1 => "Reassigned 1 task".to_string(),
            n => format!("Reassigned {} tasks", n),
        };
        Self {
            message,
            reassignments,
        }
    }
}

/// Why a sweep did not finish.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("failed to load team workloads: {0}")]
    Snapshot(#[source] anyhow::Error),

    /// A write failed mid-sweep. Moves in `committed` were already persisted
    /// and are not rolled back.
    #[error("sweep aborted after {} reassignment(s): {source}", .committed.len())]
    Aborted {
        committed: Vec<Reassignment>,
        source: anyhow::Error,
    },
}

/// Position of a task in the shedding order, or `None` if it must stay put.
fn shed_rank(priority: TaskPriority) -> Option<u8> {
    match priority {
        TaskPriority::Low => Some(0),
        TaskPriority::Medium => Some(1),
        TaskPriority::High => None,
    }
}

/// Tasks `member` should give up, in the order they should go.
fn tasks_to_shed(member: &MemberWorkload) -> Vec<&OpenTask> {
    let excess = member.current_load().saturating_sub(member.capacity());
    let mut movable: Vec<(u8, &OpenTask)> = member
        .tasks
        .iter()
        .filter(|t| t.status.is_open())
        .filter_map(|t| shed_rank(t.priority).map(|rank| (rank, t)))
        .collect();
    movable.sort_by_key(|(rank, _)| *rank);
    movable.into_iter().take(excess).map(|(_, t)| t).collect()
}

/// Plan the moves for a single team.
pub fn plan_team(team: &TeamWorkload) -> Vec<PlannedMove> {
    let mut running: HashMap<Uuid, usize> = team
        .members
        .iter()
        .map(|m| (m.member.id, m.current_load()))
        .collect();

    let mut available: Vec<&MemberWorkload> = team
        .members
        .iter()
        .filter(|m| m.current_load() < m.capacity())
        .collect();
    available.sort_by_key(|m| m.current_load());

    let mut moves = Vec::new();

    for source in team.members.iter().filter(|m| m.current_load() > m.capacity()) {
        for task in tasks_to_shed(source) {
            let target = available
                .iter()
                .copied()
                .find(|m| running.get(&m.member.id).copied().unwrap_or(0) < m.capacity());
            let Some(target) = target else {
                break;
            };

            *running.entry(target.member.id).or_insert(0) += 1;
            if let Some(count) = running.get_mut(&source.member.id) {
                *count = count.saturating_sub(1);
            }

            moves.push(PlannedMove {
                task_id: task.id,
                task_title: task.title.clone(),
                from_member_id: source.member.id,
                from_member: source.member.name.clone(),
                to_member_id: target.member.id,
                to_member: target.member.name.clone(),
                team_id: team.team.id,
                team_name: team.team.name.clone(),
            });
        }
    }

    moves
}

/// Plan the moves for every team, team by team.
pub fn plan_sweep(teams: &[TeamWorkload]) -> Vec<PlannedMove> {
    teams.iter().flat_map(plan_team).collect()
}

/// Runs rebalancing sweeps, one at a time.
///
/// Clones share the same sweep lock, so a single `Rebalancer` held in
/// application state serializes sweeps across requests.
#[derive(Debug, Clone, Default)]
pub struct Rebalancer {
    sweep_lock: Arc<Mutex<()>>,
}

impl Rebalancer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Perform one sweep over every team.
    ///
    /// `user_id` is recorded on each audit entry.
    pub fn run_sweep<S: WorkloadStore + ?Sized>(
        &self,
        store: &S,
        user_id: &str,
    ) -> Result<SweepReport, SweepError> {
        let _guard = self
            .sweep_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let teams = store.all_team_workloads().map_err(SweepError::Snapshot)?;
        let plan = plan_sweep(&teams);
        tracing::info!(
            teams = teams.len(),
            planned = plan.len(),
            "Starting rebalancing sweep"
        );

        let mut committed = Vec::with_capacity(plan.len());
        for planned in plan {
            match apply_move(store, &planned, user_id) {
                Ok(true) => {
                    tracing::info!(
                        task_id = %planned.task_id,
                        "Reassigned \"{}\" from {} to {}",
                        planned.task_title,
                        planned.from_member,
                        planned.to_member
                    );
                    committed.push(planned.into());
                }
                Ok(false) => {
                    tracing::warn!(
                        task_id = %planned.task_id,
                        "Task or target changed since the sweep started, leaving it alone"
                    );
                }
                Err(source) => {
                    tracing::error!(
                        task_id = %planned.task_id,
                        committed = committed.len(),
                        "Rebalancing sweep aborted: {:#}",
                        source
                    );
                    return Err(SweepError::Aborted { committed, source });
                }
            }
        }

        Ok(SweepReport::new(committed))
    }
}

fn apply_move<S: WorkloadStore + ?Sized>(
    store: &S,
    planned: &PlannedMove,
    user_id: &str,
) -> anyhow::Result<bool> {
    if !store.reassign_task(planned.task_id, planned.from_member_id, planned.to_member_id)? {
        return Ok(false);
    }

    store.record_activity(CreateActivityInput {
        action: ACTION_TASK_REASSIGNED.to_string(),
        description: format!(
            "Reassigned \"{}\" from {} to {}",
            planned.task_title, planned.from_member, planned.to_member
        ),
        task_id: Some(planned.task_id),
        user_id: user_id.to_string(),
        metadata: Some(serde_json::json!({
            "reason": "workload_rebalance",
            "from_member_id": planned.from_member_id,
            "to_member_id": planned.to_member_id,
            "team_id": planned.team_id,
        })),
    })?;

    Ok(true)
}
