//! teamtask: team task management with capacity-aware assignment.
//!
//! - [`models`]: teams, members, projects, tasks and the activity log.
//! - [`workload`]: the capacity evaluator and the rebalancing sweep.
//! - [`db`]: SQLite persistence, including the [`workload::WorkloadStore`] implementation.
//! - [`api`]: the axum HTTP API.

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod workload;
