use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::{internal_error, not_found};
use crate::db::Database;
use crate::models::*;

pub async fn get_member(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamMember>, (StatusCode, String)> {
    db.get_member(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Member"))
}

/// Update a member's details or capacity.
///
/// Lowering capacity below the member's current load is allowed; the excess
/// is picked up by the next rebalancing sweep.
pub async fn update_member(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateMemberInput>,
) -> Result<Json<TeamMember>, (StatusCode, String)> {
    db.update_member(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Member"))
}

pub async fn delete_member(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if db.delete_member(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Member"))
    }
}

pub async fn list_member_tasks(
    State(db): State<Database>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<Vec<Task>>, (StatusCode, String)> {
    db.get_member(member_id)
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Member"))?;

    db.get_member_tasks(member_id)
        .map(Json)
        .map_err(internal_error)
}
