use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::member::TeamMember;
use super::project::Project;

/// A named group of people that owns members and projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeamInput {
    pub name: String,
    pub description: Option<String>,
}

/// Input for updating an existing team. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTeamInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A team with its members and projects, used for detailed responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDetails {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<TeamMember>,
    pub projects: Vec<Project>,
}
