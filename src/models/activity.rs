use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Action recorded when a task is created.
pub const ACTION_TASK_CREATED: &str = "task_created";
/// Action recorded when a person changes a task's assignee.
pub const ACTION_TASK_ASSIGNED: &str = "task_assigned";
/// Action recorded when the rebalancing sweep moves a task.
pub const ACTION_TASK_REASSIGNED: &str = "task_reassigned";

/// An append-only audit entry.
///
/// Activity rows answer "who changed what, and when?". They outlive the task
/// they describe: deleting a task clears `task_id` but keeps the entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: Uuid,
    pub action: String,
    /// Human-readable description of what happened.
    pub description: String,
    pub task_id: Option<Uuid>,
    /// Principal id of whoever triggered the action.
    pub user_id: String,
    /// Optional structured details (member ids, team ids, ...).
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Input for appending an activity entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivityInput {
    pub action: String,
    pub description: String,
    pub task_id: Option<Uuid>,
    pub user_id: String,
    pub metadata: Option<serde_json::Value>,
}
