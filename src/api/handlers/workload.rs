use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{internal_error, not_found};
use crate::api::CurrentUser;
use crate::db::Database;
use crate::models::*;
use crate::workload::{
    find_best_member_for_task, load_summary, validate_member_assignment, AssignmentDecision,
    Rebalancer, SweepError, SweepReport, WorkloadStore,
};

/// Query parameters for checking an assignment.
#[derive(Debug, Deserialize)]
pub struct AssignmentCheckQuery {
    /// Treat the capacity warning as confirmed.
    #[serde(default)]
    pub force: bool,
}

/// Would assigning one more task to this member be allowed?
///
/// Always 200: the decision itself says whether the assignment is allowed,
/// needs confirmation, or cannot happen.
pub async fn check_assignment(
    State(db): State<Database>,
    Path(member_id): Path<Uuid>,
    Query(query): Query<AssignmentCheckQuery>,
) -> Result<Json<AssignmentDecision>, (StatusCode, String)> {
    validate_member_assignment(&db, member_id, query.force)
        .map(Json)
        .map_err(internal_error)
}

/// The member a new task in this team would be auto-assigned to, or `null`.
pub async fn get_best_member(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Option<TeamMember>>, (StatusCode, String)> {
    db.get_team(team_id)
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Team"))?;

    find_best_member_for_task(&db, team_id)
        .map(Json)
        .map_err(internal_error)
}

pub async fn get_team_workload(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<MemberLoad>>, (StatusCode, String)> {
    let team = db
        .team_workload(team_id)
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Team"))?;

    Ok(Json(load_summary(&team)))
}

/// Run one rebalancing sweep across every team.
///
/// A sweep that fails part way returns 500 with the reassignments that were
/// already committed, so the caller can report a partial result.
pub async fn rebalance(
    State(db): State<Database>,
    State(rebalancer): State<Rebalancer>,
    CurrentUser(user_id): CurrentUser,
) -> Result<Json<SweepReport>, Response> {
    let result = tokio::task::spawn_blocking(move || rebalancer.run_sweep(&db, &user_id))
        .await
        .map_err(|e| internal_error(anyhow::anyhow!("sweep task panicked: {}", e)).into_response())?;

    match result {
        Ok(report) => {
            tracing::info!("{}", report.message);
            Ok(Json(report))
        }
        Err(SweepError::Aborted { committed, source }) => {
            tracing::error!(
                committed = committed.len(),
                "Rebalancing sweep failed: {:#}",
                source
            );
            let body = SweepReport {
                message: format!(
                    "Rebalancing failed after {} reassignment(s)",
                    committed.len()
                ),
                reassignments: committed,
            };
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
        }
        Err(e) => Err(internal_error(e.into()).into_response()),
    }
}

/// Query parameters for listing activity.
#[derive(Debug, Deserialize)]
pub struct ListActivityQuery {
    /// Maximum number of entries to return. Defaults to 50, capped at 500.
    pub limit: Option<u32>,
}

pub async fn list_activity(
    State(db): State<Database>,
    Query(query): Query<ListActivityQuery>,
) -> Result<Json<Vec<ActivityLog>>, (StatusCode, String)> {
    let limit = query.limit.unwrap_or(50).min(500);
    db.get_recent_activity(limit)
        .map(Json)
        .map_err(internal_error)
}
