use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A unit of work inside a project, optionally assigned to a team member.
///
/// Only tasks whose status is not [`TaskStatus::Done`] count toward the
/// assignee's load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub project_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// The team member currently responsible for this task.
    pub assigned_to: Option<Uuid>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The progress of a task.
///
/// - `Pending`: Not yet started
/// - `InProgress`: Someone is working on it
/// - `Done`: Finished; no longer counts toward load
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Whether a task in this status occupies its assignee's capacity.
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Done)
    }
}

/// How urgent a task is.
///
/// Deliberately not `Ord`: the only place priorities are ranked is the
/// rebalancing sweep, which decides for itself which tasks may move.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Input for creating a task within a project.
///
/// Assignment is resolved before the task is written: an explicit
/// `assigned_to` is checked against the member's capacity (and may be
/// pushed through a warning with `force`), while `auto_assign` picks the
/// least-loaded member of the project's team when no assignee is given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskInput {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<Uuid>,
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub auto_assign: bool,
    /// Proceed even though the assignee is at or over capacity.
    #[serde(default)]
    pub force: bool,
}

/// Input for updating a task. All fields are optional for partial updates.
///
/// `description` and `due_date` distinguish a missing key (keep) from an
/// explicit `null` (clear).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    pub assigned_to: Option<Uuid>,
    /// Clear the current assignee. Ignored when `assigned_to` is set.
    #[serde(default)]
    pub unassign: bool,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    #[serde(
        default,
        deserialize_with = "nullable",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<NaiveDate>>,
    /// Proceed even though the new assignee is at or over capacity.
    #[serde(default)]
    pub force: bool,
}

/// Resolved column values for a task update, as written by the database layer.
#[derive(Debug, Clone)]
pub struct TaskChanges {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    /// `Some(None)` clears the assignee.
    pub assigned_to: Option<Option<Uuid>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<NaiveDate>>,
}

/// A present key, even `null`, becomes `Some`; a missing key stays `None`
/// through `#[serde(default)]`.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
