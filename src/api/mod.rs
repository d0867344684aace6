mod handlers;
pub mod middleware;

use axum::{
    extract::FromRef,
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::db::Database;
use crate::workload::Rebalancer;
use middleware::{auth_middleware, rate_limit_middleware, SecurityConfig};

pub use middleware::{CurrentUser, USER_ID_HEADER};

/// Shared handler state.
///
/// Handlers extract `State<Database>` or `State<Rebalancer>` directly via
/// [`FromRef`]. There is exactly one `Rebalancer` per router so that
/// concurrent sweep requests queue on the same lock.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub rebalancer: Rebalancer,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            rebalancer: Rebalancer::new(),
        }
    }
}

impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Rebalancer {
    fn from_ref(state: &AppState) -> Self {
        state.rebalancer.clone()
    }
}

/// Router with authentication and rate limiting disabled.
pub fn create_router(db: Database) -> Router {
    create_router_with_security(db, SecurityConfig::disabled())
}

pub fn create_router_with_security(db: Database, security: SecurityConfig) -> Router {
    let mut api = Router::new()
        // Teams
        .route("/teams", get(handlers::list_teams).post(handlers::create_team))
        .route(
            "/teams/{id}",
            get(handlers::get_team)
                .put(handlers::update_team)
                .delete(handlers::delete_team),
        )
        .route(
            "/teams/{id}/members",
            get(handlers::list_team_members).post(handlers::create_member),
        )
        .route(
            "/teams/{id}/projects",
            get(handlers::list_team_projects).post(handlers::create_project),
        )
        .route("/teams/{id}/workload", get(handlers::get_team_workload))
        .route("/teams/{id}/best-member", get(handlers::get_best_member))
        // Members
        .route(
            "/members/{id}",
            get(handlers::get_member)
                .put(handlers::update_member)
                .delete(handlers::delete_member),
        )
        .route("/members/{id}/tasks", get(handlers::list_member_tasks))
        .route(
            "/members/{id}/assignment-check",
            get(handlers::check_assignment),
        )
        // Projects
        .route(
            "/projects/{id}",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project),
        )
        .route(
            "/projects/{id}/tasks",
            get(handlers::list_project_tasks).post(handlers::create_task),
        )
        // Tasks
        .route(
            "/tasks/{id}",
            get(handlers::get_task)
                .put(handlers::update_task)
                .delete(handlers::delete_task),
        )
        .route("/tasks/{id}/activity", get(handlers::list_task_activity))
        // Workload
        .route("/rebalance", post(handlers::rebalance))
        .route("/activity", get(handlers::list_activity))
        .layer(from_fn_with_state(security.clone(), auth_middleware));

    if let Some(limiter) = security.rate_limiter.clone() {
        api = api.layer(from_fn_with_state(limiter, rate_limit_middleware));
    }

    // Added after the auth layer so probes work without credentials.
    let api = api.route("/health", get(handlers::health));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(security.cors_origins.as_deref()))
        .with_state(AppState::new(db))
}

fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    match origins {
        Some(origins) => {
            let allowed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match o.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(allowed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    }
}
