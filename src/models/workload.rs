use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::member::TeamMember;
use super::task::{TaskPriority, TaskStatus};
use super::team::Team;

/// The slice of a task the workload engine looks at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenTask {
    pub id: Uuid,
    pub title: String,
    pub priority: TaskPriority,
    pub status: TaskStatus,
}

/// A member together with the tasks currently assigned to them.
///
/// Stores only hand out tasks that are not done, but load is still counted
/// by status so a stale row can never inflate it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberWorkload {
    pub member: TeamMember,
    pub tasks: Vec<OpenTask>,
}

impl MemberWorkload {
    /// Number of assigned tasks that are not done.
    pub fn current_load(&self) -> usize {
        self.tasks.iter().filter(|t| t.status.is_open()).count()
    }

    pub fn capacity(&self) -> usize {
        self.member.capacity as usize
    }
}

/// A snapshot of one team: every member and their open tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamWorkload {
    pub team: Team,
    pub members: Vec<MemberWorkload>,
}

/// Load summary for a single member, as shown on a team's workload page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberLoad {
    pub member_id: Uuid,
    pub name: String,
    pub current_load: usize,
    pub capacity: usize,
    pub over_capacity: bool,
}
