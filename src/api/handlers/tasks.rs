use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use super::{assignment_blocked, internal_error, not_found};
use crate::api::CurrentUser;
use crate::db::Database;
use crate::models::*;
use crate::workload::{choose_assignee, AssigneeChoice};

fn fail(e: anyhow::Error) -> Response {
    internal_error(e).into_response()
}

pub async fn get_task(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Json<Task>, (StatusCode, String)> {
    db.get_task(id)
        .map_err(internal_error)?
        .map(Json)
        .ok_or_else(|| not_found("Task"))
}

/// Create a task, resolving its assignee through the capacity check first.
///
/// Returns 409 with the warning decision when the requested member is at
/// capacity and `force` is not set.
pub async fn create_task(
    State(db): State<Database>,
    CurrentUser(user_id): CurrentUser,
    Path(project_id): Path<Uuid>,
    Json(mut input): Json<CreateTaskInput>,
) -> Result<(StatusCode, Json<Task>), Response> {
    let project = db
        .get_project(project_id)
        .map_err(fail)?
        .ok_or_else(|| not_found("Project").into_response())?;

    let assignee = match choose_assignee(
        &db,
        project.team_id,
        input.assigned_to,
        input.auto_assign,
        input.force,
    )
    .map_err(fail)?
    {
        AssigneeChoice::Assign(member) => Some(member),
        AssigneeChoice::Unassigned => None,
        AssigneeChoice::Blocked(decision) => return Err(assignment_blocked(decision)),
    };

    let forced = input.force;
    input.assigned_to = assignee.as_ref().map(|m| m.id);
    let task = db.create_task(project_id, input).map_err(fail)?;

    let description = match &assignee {
        Some(member) => format!("Created \"{}\" and assigned it to {}", task.title, member.name),
        None => format!("Created \"{}\"", task.title),
    };
    db.create_activity(CreateActivityInput {
        action: ACTION_TASK_CREATED.to_string(),
        description,
        task_id: Some(task.id),
        user_id,
        metadata: Some(serde_json::json!({
            "assigned_to": task.assigned_to,
            "forced": forced,
        })),
    })
    .map_err(fail)?;

    tracing::info!(task_id = %task.id, assigned_to = ?task.assigned_to, "Task created");
    Ok((StatusCode::CREATED, Json(task)))
}

/// Update a task.
///
/// Only a change of assignee goes through the capacity check. Re-sending the
/// current assignee, or changing other fields, never triggers a warning.
pub async fn update_task(
    State(db): State<Database>,
    CurrentUser(user_id): CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateTaskInput>,
) -> Result<Json<Task>, Response> {
    let existing = db
        .get_task(id)
        .map_err(fail)?
        .ok_or_else(|| not_found("Task").into_response())?;

    let mut new_assignee = None;
    let assigned_to = match input.assigned_to {
        Some(member_id) if existing.assigned_to == Some(member_id) => None,
        Some(member_id) => {
            let project = db
                .get_project(existing.project_id)
                .map_err(fail)?
                .ok_or_else(|| fail(anyhow::anyhow!("Task {} has no project", id)))?;

            match choose_assignee(&db, project.team_id, Some(member_id), false, input.force)
                .map_err(fail)?
            {
                AssigneeChoice::Assign(member) => {
                    let change = Some(Some(member.id));
                    new_assignee = Some(member);
                    change
                }
                AssigneeChoice::Blocked(decision) => return Err(assignment_blocked(decision)),
                AssigneeChoice::Unassigned => None,
            }
        }
        None if input.unassign && existing.assigned_to.is_some() => Some(None),
        None => None,
    };

    let changes = TaskChanges {
        title: input.title,
        description: input.description,
        assigned_to,
        priority: input.priority,
        status: input.status,
        due_date: input.due_date,
    };

    let task = db
        .update_task(id, changes)
        .map_err(fail)?
        .ok_or_else(|| not_found("Task").into_response())?;

    if assigned_to.is_some() {
        let description = match &new_assignee {
            Some(member) => format!("Assigned \"{}\" to {}", task.title, member.name),
            None => format!("Unassigned \"{}\"", task.title),
        };
        db.create_activity(CreateActivityInput {
            action: ACTION_TASK_ASSIGNED.to_string(),
            description,
            task_id: Some(task.id),
            user_id,
            metadata: Some(serde_json::json!({
                "from_member_id": existing.assigned_to,
                "to_member_id": task.assigned_to,
                "forced": input.force,
            })),
        })
        .map_err(fail)?;
    }

    Ok(Json(task))
}

pub async fn delete_task(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    if db.delete_task(id).map_err(internal_error)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Task"))
    }
}

pub async fn list_task_activity(
    State(db): State<Database>,
    Path(task_id): Path<Uuid>,
) -> Result<Json<Vec<ActivityLog>>, (StatusCode, String)> {
    db.get_task(task_id)
        .map_err(internal_error)?
        .ok_or_else(|| not_found("Task"))?;

    db.get_task_activity(task_id)
        .map(Json)
        .map_err(internal_error)
}
