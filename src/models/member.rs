use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

/// Largest capacity a member may declare.
pub const MAX_CAPACITY: u32 = 5;

/// A person on a team who can be assigned tasks.
///
/// `capacity` is the maximum number of open (not done) tasks the member
/// should hold at once. The member's current load is never stored; it is
/// counted from task rows whenever it is needed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub id: Uuid,
    pub team_id: Uuid,
    pub name: String,
    /// Free-form role label, e.g. "Developer" or "Designer".
    pub role: String,
    pub capacity: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for adding a member to a team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMemberInput {
    pub name: String,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

/// Input for updating a member. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMemberInput {
    pub name: Option<String>,
    pub role: Option<String>,
    pub capacity: Option<u32>,
}

fn default_role() -> String {
    "Member".to_string()
}

fn default_capacity() -> u32 {
    3
}

/// Reject capacities outside `0..=MAX_CAPACITY`.
pub fn check_capacity(capacity: u32) -> Result<(), ValidationError> {
    if capacity > MAX_CAPACITY {
        return Err(ValidationError::CapacityOutOfRange {
            capacity,
            max: MAX_CAPACITY,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_bounds_are_inclusive() {
        assert!(check_capacity(0).is_ok());
        assert!(check_capacity(MAX_CAPACITY).is_ok());
        assert!(matches!(
            check_capacity(MAX_CAPACITY + 1),
            Err(ValidationError::CapacityOutOfRange { capacity: 6, .. })
        ));
    }

    #[test]
    fn create_input_fills_role_and_capacity() {
        let input: CreateMemberInput = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert_eq!(input.role, "Member");
        assert_eq!(input.capacity, 3);
    }
}
