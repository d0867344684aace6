//! Domain models for teamtask.
//!
//! # Core Concepts
//!
//! - [`Team`]: A named group owning members and projects.
//! - [`TeamMember`]: Someone on a team, with a declared task `capacity` (0-5).
//! - [`Project`]: Belongs to one team and groups its tasks.
//! - [`Task`]: A unit of work with a priority, status and optional assignee.
//! - [`ActivityLog`]: Append-only audit trail of assignment changes.
//!
//! ## Workload views
//!
//! [`MemberWorkload`] and [`TeamWorkload`] are read models built from live
//! task rows. They are what the [`crate::workload`] engine reasons about.

mod activity;
mod member;
mod project;
mod task;
mod team;
mod workload;

pub use activity::*;
pub use member::*;
pub use project::*;
pub use task::*;
pub use team::*;
pub use workload::*;

use thiserror::Error;

/// Input that the database layer refuses to write.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("capacity must be between 0 and {max}, got {capacity}")]
    CapacityOutOfRange { capacity: u32, max: u32 },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Reject blank names and titles.
pub fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty(field));
    }
    Ok(())
}
