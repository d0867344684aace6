mod members;
mod projects;
mod tasks;
mod teams;
mod workload;

pub use members::*;
pub use projects::*;
pub use tasks::*;
pub use teams::*;
pub use workload::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::ValidationError;
use crate::workload::{AssignmentDecision, RejectReason};

// ============================================================
// Error Handling
// ============================================================

/// Log an internal error and return a sanitized response to the client.
///
/// Validation failures and "not found" errors raised by the database layer
/// are safe to show and come back as BAD_REQUEST. Everything else is logged
/// in full and reported as a generic 500.
fn internal_error(e: anyhow::Error) -> (StatusCode, String) {
    if let Some(validation) = e.downcast_ref::<ValidationError>() {
        tracing::warn!("Validation error: {}", validation);
        return (StatusCode::BAD_REQUEST, validation.to_string());
    }

    let msg = e.to_string();
    if msg.contains("not found") {
        tracing::warn!("Validation error: {}", msg);
        return (StatusCode::BAD_REQUEST, msg);
    }

    tracing::error!("Internal error: {:#}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal server error".to_string(),
    )
}

fn not_found(what: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("{} not found", what))
}

/// Response for an assignment the evaluator did not allow.
///
/// The body is the decision itself so the caller can show the warning and
/// retry with `force`.
fn assignment_blocked(decision: AssignmentDecision) -> Response {
    let status = match &decision {
        AssignmentDecision::Warned { .. } => StatusCode::CONFLICT,
        AssignmentDecision::Rejected {
            reason: RejectReason::MemberNotFound,
        } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_REQUEST,
    };
    (status, Json(decision)).into_response()
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
