use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use super::{internal_error, not_found};
use crate::db::Database;
use crate::models::*;

pub async fn list_teams(
    State(db): State<Database>,
) -> Result<Json<Vec<Team>>, (StatusCode, String)> {
    db.get_all_teams().map(Json).map_err(internal_error)
}

pub async fn get_team(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<TeamDetails>, (StatusCode, String)> {
    db.get_team_details(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Team"))
}

pub async fn create_team(
    State(db): State<Database>,
    Json(input): Json<CreateTeamInput>,
) -> Result<(StatusCode, Json<Team>), (StatusCode, String)> {
    db.create_team(input)
        .map(|t| (StatusCode::CREATED, Json(t)))
        .map_err(internal_error)
}

pub async fn update_team(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTeamInput>,
) -> Result<Json<Team>, (StatusCode, String)> {
    db.update_team(id, input)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Team"))
}

pub async fn delete_team(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if db.delete_team(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Team"))
    }
}

pub async fn list_team_members(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<TeamMember>>, (StatusCode, String)> {
    db.get_team(team_id)
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Team"))?;

    db.get_team_members(team_id)
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_member(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
    Json(input): Json<CreateMemberInput>,
) -> Result<(StatusCode, Json<TeamMember>), (StatusCode, String)> {
    db.get_team(team_id)
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Team"))?;

    db.create_member(team_id, input)
        .map(|m| (StatusCode::CREATED, Json(m)))
        .map_err(internal_error)
}

pub async fn list_team_projects(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
) -> Result<Json<Vec<Project>>, (StatusCode, String)> {
    db.get_team(team_id)
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Team"))?;

    db.get_team_projects(team_id)
        .map(Json)
        .map_err(internal_error)
}

pub async fn create_project(
    State(db): State<Database>,
    Path(team_id): Path<Uuid>,
    Json(input): Json<CreateProjectInput>,
) -> Result<(StatusCode, Json<Project>), (StatusCode, String)> {
    db.get_team(team_id)
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Team"))?;

    db.create_project(team_id, input)
        .map(|p| (StatusCode::CREATED, Json(p)))
        .map_err(internal_error)
}
