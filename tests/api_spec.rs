use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use teamtask::api::create_router;
use teamtask::db::Database;
use teamtask::models::*;
use teamtask::workload::{AssignmentDecision, RejectReason, SweepReport};

const USER: &str = "user-1";

fn setup() -> TestServer {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    let app = create_router(db);
    TestServer::new(app).expect("Failed to create test server")
}

async fn create_test_team(server: &TestServer) -> Team {
    server
        .post("/api/v1/teams")
        .json(&CreateTeamInput {
            name: "Platform".to_string(),
            description: None,
        })
        .await
        .json::<Team>()
}

async fn create_test_member(server: &TestServer, team: &Team, name: &str, capacity: u32) -> TeamMember {
    server
        .post(&format!("/api/v1/teams/{}/members", team.id))
        .json(&CreateMemberInput {
            name: name.to_string(),
            role: "Developer".to_string(),
            capacity,
        })
        .await
        .json::<TeamMember>()
}

async fn create_test_project(server: &TestServer, team: &Team) -> Project {
    server
        .post(&format!("/api/v1/teams/{}/projects", team.id))
        .json(&CreateProjectInput {
            name: "Test Project".to_string(),
            description: None,
        })
        .await
        .json::<Project>()
}

async fn create_assigned_task(
    server: &TestServer,
    project: &Project,
    title: &str,
    member: &TeamMember,
    priority: TaskPriority,
) -> Task {
    let response = server
        .post(&format!("/api/v1/projects/{}/tasks", project.id))
        .add_header("X-User-Id", USER)
        .json(&CreateTaskInput {
            title: title.to_string(),
            assigned_to: Some(member.id),
            priority: Some(priority),
            force: true,
            ..Default::default()
        })
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Task>()
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();

        let response = server.get("/api/v1/health").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "status": "ok" }));
    }
}

mod cors {
    use super::*;

    #[tokio::test]
    async fn permissive_by_default() {
        let server = setup();

        let response = server
            .get("/api/v1/health")
            .add_header("Origin", "https://example.com")
            .await;

        response.assert_status_ok();
        response.assert_header("access-control-allow-origin", "*");
    }
}

mod teams {
    use super::*;

    #[tokio::test]
    async fn returns_empty_list_when_no_teams_exist() {
        let server = setup();

        let response = server.get("/api/v1/teams").await;

        response.assert_status_ok();
        let teams: Vec<Team> = response.json();
        assert!(teams.is_empty());
    }

    #[tokio::test]
    async fn creates_team() {
        let server = setup();

        let response = server
            .post("/api/v1/teams")
            .json(&json!({ "name": "Platform", "description": "Infra" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let team: Team = response.json();
        assert_eq!(team.name, "Platform");
        assert_eq!(team.description, Some("Infra".to_string()));
    }

    #[tokio::test]
    async fn rejects_blank_name() {
        let server = setup();

        let response = server
            .post("/api/v1/teams")
            .json(&json!({ "name": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn returns_details_with_members_and_projects() {
        let server = setup();
        let team = create_test_team(&server).await;
        create_test_member(&server, &team, "Ada", 3).await;
        create_test_project(&server, &team).await;

        let response = server.get(&format!("/api/v1/teams/{}", team.id)).await;

        response.assert_status_ok();
        let details: TeamDetails = response.json();
        assert_eq!(details.team.id, team.id);
        assert_eq!(details.members.len(), 1);
        assert_eq!(details.projects.len(), 1);
    }

    #[tokio::test]
    async fn returns_404_for_missing_team() {
        let server = setup();

        let response = server
            .get(&format!("/api/v1/teams/{}", uuid::Uuid::new_v4()))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn deletes_team() {
        let server = setup();
        let team = create_test_team(&server).await;

        server
            .delete(&format!("/api/v1/teams/{}", team.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("/api/v1/teams/{}", team.id))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod members {
    use super::*;

    #[tokio::test]
    async fn defaults_role_and_capacity() {
        let server = setup();
        let team = create_test_team(&server).await;

        let response = server
            .post(&format!("/api/v1/teams/{}/members", team.id))
            .json(&json!({ "name": "Ada" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let member: TeamMember = response.json();
        assert_eq!(member.role, "Member");
        assert_eq!(member.capacity, 3);
    }

    #[tokio::test]
    async fn rejects_capacity_above_five() {
        let server = setup();
        let team = create_test_team(&server).await;

        let response = server
            .post(&format!("/api/v1/teams/{}/members", team.id))
            .json(&json!({ "name": "Ada", "capacity": 6 }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn returns_404_when_team_is_missing() {
        let server = setup();

        let response = server
            .post(&format!("/api/v1/teams/{}/members", uuid::Uuid::new_v4()))
            .json(&json!({ "name": "Ada" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn updates_capacity() {
        let server = setup();
        let team = create_test_team(&server).await;
        let member = create_test_member(&server, &team, "Ada", 3).await;

        let response = server
            .put(&format!("/api/v1/members/{}", member.id))
            .json(&json!({ "capacity": 5 }))
            .await;

        response.assert_status_ok();
        let updated: TeamMember = response.json();
        assert_eq!(updated.capacity, 5);
    }

    #[tokio::test]
    async fn deleting_member_unassigns_their_tasks() {
        let server = setup();
        let team = create_test_team(&server).await;
        let member = create_test_member(&server, &team, "Ada", 3).await;
        let project = create_test_project(&server, &team).await;
        let task = create_assigned_task(&server, &project, "Task", &member, TaskPriority::Low).await;

        server
            .delete(&format!("/api/v1/members/{}", member.id))
            .await
            .assert_status(StatusCode::NO_CONTENT);

        let task: Task = server
            .get(&format!("/api/v1/tasks/{}", task.id))
            .await
            .json();
        assert!(task.assigned_to.is_none());
    }
}

mod task_assignment {
    use super::*;

    #[tokio::test]
    async fn requires_user_header() {
        let server = setup();
        let team = create_test_team(&server).await;
        let project = create_test_project(&server, &team).await;

        let response = server
            .post(&format!("/api/v1/projects/{}/tasks", project.id))
            .json(&json!({ "title": "Task" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn creates_unassigned_task_with_defaults() {
        let server = setup();
        let team = create_test_team(&server).await;
        let project = create_test_project(&server, &team).await;

        let response = server
            .post(&format!("/api/v1/projects/{}/tasks", project.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "Task" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let task: Task = response.json();
        assert!(task.assigned_to.is_none());
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn assigns_member_with_spare_capacity() {
        let server = setup();
        let team = create_test_team(&server).await;
        let member = create_test_member(&server, &team, "Ada", 2).await;
        let project = create_test_project(&server, &team).await;

        let response = server
            .post(&format!("/api/v1/projects/{}/tasks", project.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "Task", "assigned_to": member.id }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let task: Task = response.json();
        assert_eq!(task.assigned_to, Some(member.id));
    }

    #[tokio::test]
    async fn warns_when_member_is_at_capacity() {
        let server = setup();
        let team = create_test_team(&server).await;
        let member = create_test_member(&server, &team, "Ada", 1).await;
        let project = create_test_project(&server, &team).await;
        create_assigned_task(&server, &project, "First", &member, TaskPriority::Medium).await;

        let response = server
            .post(&format!("/api/v1/projects/{}/tasks", project.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "Second", "assigned_to": member.id }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
        let decision: AssignmentDecision = response.json();
        match decision {
            AssignmentDecision::Warned {
                message,
                current_load,
                capacity,
            } => {
                assert!(message.contains("Ada"));
                assert_eq!(current_load, 1);
                assert_eq!(capacity, 1);
            }
            other => panic!("expected a warning, got {:?}", other),
        }

        let tasks: Vec<Task> = server
            .get(&format!("/api/v1/projects/{}/tasks", project.id))
            .await
            .json();
        assert_eq!(tasks.len(), 1);
    }

    #[tokio::test]
    async fn force_overrides_the_warning() {
        let server = setup();
        let team = create_test_team(&server).await;
        let member = create_test_member(&server, &team, "Ada", 1).await;
        let project = create_test_project(&server, &team).await;
        create_assigned_task(&server, &project, "First", &member, TaskPriority::Medium).await;

        let response = server
            .post(&format!("/api/v1/projects/{}/tasks", project.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "Second", "assigned_to": member.id, "force": true }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let tasks: Vec<Task> = server
            .get(&format!("/api/v1/members/{}/tasks", member.id))
            .await
            .json();
        assert_eq!(tasks.len(), 2);
    }

    #[tokio::test]
    async fn zero_capacity_member_always_warns() {
        let server = setup();
        let team = create_test_team(&server).await;
        let member = create_test_member(&server, &team, "Ada", 0).await;
        let project = create_test_project(&server, &team).await;

        let response = server
            .post(&format!("/api/v1/projects/{}/tasks", project.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "Task", "assigned_to": member.id }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn rejects_unknown_member() {
        let server = setup();
        let team = create_test_team(&server).await;
        let project = create_test_project(&server, &team).await;

        let response = server
            .post(&format!("/api/v1/projects/{}/tasks", project.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "Task", "assigned_to": uuid::Uuid::new_v4() }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let decision: AssignmentDecision = response.json();
        assert_eq!(
            decision,
            AssignmentDecision::Rejected {
                reason: RejectReason::MemberNotFound
            }
        );
    }

    #[tokio::test]
    async fn rejects_member_from_another_team() {
        let server = setup();
        let team = create_test_team(&server).await;
        let other_team = create_test_team(&server).await;
        let outsider = create_test_member(&server, &other_team, "Bob", 3).await;
        let project = create_test_project(&server, &team).await;

        let response = server
            .post(&format!("/api/v1/projects/{}/tasks", project.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "Task", "assigned_to": outsider.id }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let decision: AssignmentDecision = response.json();
        assert_eq!(
            decision,
            AssignmentDecision::Rejected {
                reason: RejectReason::MemberNotInTeam
            }
        );
    }

    #[tokio::test]
    async fn auto_assign_picks_least_loaded_member() {
        let server = setup();
        let team = create_test_team(&server).await;
        let busy = create_test_member(&server, &team, "Ada", 3).await;
        let idle = create_test_member(&server, &team, "Bob", 3).await;
        let project = create_test_project(&server, &team).await;
        create_assigned_task(&server, &project, "Existing", &busy, TaskPriority::Medium).await;

        let response = server
            .post(&format!("/api/v1/projects/{}/tasks", project.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "New", "auto_assign": true }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let task: Task = response.json();
        assert_eq!(task.assigned_to, Some(idle.id));
    }

    #[tokio::test]
    async fn auto_assign_leaves_task_unassigned_when_everyone_is_full() {
        let server = setup();
        let team = create_test_team(&server).await;
        create_test_member(&server, &team, "Ada", 0).await;
        let project = create_test_project(&server, &team).await;

        let response = server
            .post(&format!("/api/v1/projects/{}/tasks", project.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "New", "auto_assign": true }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let task: Task = response.json();
        assert!(task.assigned_to.is_none());
    }

    #[tokio::test]
    async fn records_creation_in_activity_log() {
        let server = setup();
        let team = create_test_team(&server).await;
        let member = create_test_member(&server, &team, "Ada", 3).await;
        let project = create_test_project(&server, &team).await;
        let task = create_assigned_task(&server, &project, "Task", &member, TaskPriority::Low).await;

        let entries: Vec<ActivityLog> = server
            .get(&format!("/api/v1/tasks/{}/activity", task.id))
            .await
            .json();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, ACTION_TASK_CREATED);
        assert_eq!(entries[0].user_id, USER);
    }
}

mod task_updates {
    use super::*;

    #[tokio::test]
    async fn reassigning_to_full_member_warns() {
        let server = setup();
        let team = create_test_team(&server).await;
        let ada = create_test_member(&server, &team, "Ada", 3).await;
        let bob = create_test_member(&server, &team, "Bob", 1).await;
        let project = create_test_project(&server, &team).await;
        create_assigned_task(&server, &project, "Bob's", &bob, TaskPriority::Medium).await;
        let task = create_assigned_task(&server, &project, "Ada's", &ada, TaskPriority::Medium).await;

        let response = server
            .put(&format!("/api/v1/tasks/{}", task.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "assigned_to": bob.id }))
            .await;

        response.assert_status(StatusCode::CONFLICT);

        let response = server
            .put(&format!("/api/v1/tasks/{}", task.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "assigned_to": bob.id, "force": true }))
            .await;

        response.assert_status_ok();
        let updated: Task = response.json();
        assert_eq!(updated.assigned_to, Some(bob.id));
    }

    #[tokio::test]
    async fn resending_current_assignee_skips_the_check() {
        let server = setup();
        let team = create_test_team(&server).await;
        let ada = create_test_member(&server, &team, "Ada", 1).await;
        let project = create_test_project(&server, &team).await;
        let task = create_assigned_task(&server, &project, "Task", &ada, TaskPriority::Medium).await;

        let response = server
            .put(&format!("/api/v1/tasks/{}", task.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "assigned_to": ada.id, "status": "in_progress" }))
            .await;

        response.assert_status_ok();
        let updated: Task = response.json();
        assert_eq!(updated.status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn unassign_clears_assignee() {
        let server = setup();
        let team = create_test_team(&server).await;
        let ada = create_test_member(&server, &team, "Ada", 3).await;
        let project = create_test_project(&server, &team).await;
        let task = create_assigned_task(&server, &project, "Task", &ada, TaskPriority::Medium).await;

        let response = server
            .put(&format!("/api/v1/tasks/{}", task.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "unassign": true }))
            .await;

        response.assert_status_ok();
        let updated: Task = response.json();
        assert!(updated.assigned_to.is_none());

        let entries: Vec<ActivityLog> = server
            .get(&format!("/api/v1/tasks/{}/activity", task.id))
            .await
            .json();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|e| e.action == ACTION_TASK_ASSIGNED));
    }

    #[tokio::test]
    async fn completing_a_task_frees_capacity() {
        let server = setup();
        let team = create_test_team(&server).await;
        let ada = create_test_member(&server, &team, "Ada", 1).await;
        let project = create_test_project(&server, &team).await;
        let task = create_assigned_task(&server, &project, "Task", &ada, TaskPriority::Medium).await;

        server
            .put(&format!("/api/v1/tasks/{}", task.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "status": "done" }))
            .await
            .assert_status_ok();

        let decision: AssignmentDecision = server
            .get(&format!("/api/v1/members/{}/assignment-check", ada.id))
            .await
            .json();
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn null_clears_description_and_due_date() {
        let server = setup();
        let team = create_test_team(&server).await;
        let project = create_test_project(&server, &team).await;
        let task: Task = server
            .post(&format!("/api/v1/projects/{}/tasks", project.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "Ship", "description": "Notes", "due_date": "2026-11-30" }))
            .await
            .json();

        let untouched: Task = server
            .put(&format!("/api/v1/tasks/{}", task.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "Ship it" }))
            .await
            .json();
        assert_eq!(untouched.description, Some("Notes".to_string()));
        assert!(untouched.due_date.is_some());

        let response = server
            .put(&format!("/api/v1/tasks/{}", task.id))
            .add_header("X-User-Id", USER)
            .json(&json!({ "description": null, "due_date": null }))
            .await;

        response.assert_status_ok();
        let cleared: Task = response.json();
        assert!(cleared.description.is_none());
        assert!(cleared.due_date.is_none());
        assert_eq!(cleared.title, "Ship it");
    }

    #[tokio::test]
    async fn returns_404_for_missing_task() {
        let server = setup();

        let response = server
            .put(&format!("/api/v1/tasks/{}", uuid::Uuid::new_v4()))
            .add_header("X-User-Id", USER)
            .json(&json!({ "title": "Nope" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}

mod workload {
    use super::*;

    #[tokio::test]
    async fn assignment_check_reports_tagged_decision() {
        let server = setup();
        let team = create_test_team(&server).await;
        let ada = create_test_member(&server, &team, "Ada", 1).await;
        let project = create_test_project(&server, &team).await;
        create_assigned_task(&server, &project, "Task", &ada, TaskPriority::Medium).await;

        let response = server
            .get(&format!("/api/v1/members/{}/assignment-check", ada.id))
            .await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["decision"], "warned");
        assert_eq!(body["current_load"], 1);
        assert_eq!(body["capacity"], 1);

        let forced: serde_json::Value = server
            .get(&format!("/api/v1/members/{}/assignment-check", ada.id))
            .add_query_param("force", true)
            .await
            .json();
        assert_eq!(forced["decision"], "allowed");
    }

    #[tokio::test]
    async fn assignment_check_rejects_unknown_member() {
        let server = setup();

        let body: serde_json::Value = server
            .get(&format!("/api/v1/members/{}/assignment-check", uuid::Uuid::new_v4()))
            .await
            .json();

        assert_eq!(body, json!({ "decision": "rejected", "reason": "member_not_found" }));
    }

    #[tokio::test]
    async fn best_member_is_null_when_everyone_is_full() {
        let server = setup();
        let team = create_test_team(&server).await;
        create_test_member(&server, &team, "Ada", 0).await;

        let response = server
            .get(&format!("/api/v1/teams/{}/best-member", team.id))
            .await;

        response.assert_status_ok();
        response.assert_json(&serde_json::Value::Null);
    }

    #[tokio::test]
    async fn best_member_prefers_first_added_on_ties() {
        let server = setup();
        let team = create_test_team(&server).await;
        let first = create_test_member(&server, &team, "Zed", 3).await;
        create_test_member(&server, &team, "Ada", 3).await;

        let best: Option<TeamMember> = server
            .get(&format!("/api/v1/teams/{}/best-member", team.id))
            .await
            .json();

        assert_eq!(best.map(|m| m.id), Some(first.id));
    }

    #[tokio::test]
    async fn team_workload_summarizes_each_member() {
        let server = setup();
        let team = create_test_team(&server).await;
        let ada = create_test_member(&server, &team, "Ada", 1).await;
        create_test_member(&server, &team, "Bob", 2).await;
        let project = create_test_project(&server, &team).await;
        create_assigned_task(&server, &project, "Task", &ada, TaskPriority::Medium).await;

        let loads: Vec<MemberLoad> = server
            .get(&format!("/api/v1/teams/{}/workload", team.id))
            .await
            .json();

        assert_eq!(loads.len(), 2);
        assert_eq!(loads[0].name, "Ada");
        assert_eq!(loads[0].current_load, 1);
        assert!(loads[0].over_capacity);
        assert_eq!(loads[1].current_load, 0);
        assert!(!loads[1].over_capacity);
    }
}

mod rebalance {
    use super::*;

    #[tokio::test]
    async fn requires_user_header() {
        let server = setup();

        server
            .post("/api/v1/rebalance")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn reports_nothing_to_do_on_empty_database() {
        let server = setup();

        let response = server
            .post("/api/v1/rebalance")
            .add_header("X-User-Id", USER)
            .await;

        response.assert_status_ok();
        let report: SweepReport = response.json();
        assert_eq!(report.message, "No tasks needed reassigning");
        assert!(report.reassignments.is_empty());
    }

    #[tokio::test]
    async fn moves_low_priority_work_to_idle_member() {
        let server = setup();
        let team = create_test_team(&server).await;
        let ada = create_test_member(&server, &team, "Ada", 2).await;
        let bob = create_test_member(&server, &team, "Bob", 3).await;
        let project = create_test_project(&server, &team).await;
        create_assigned_task(&server, &project, "Urgent", &ada, TaskPriority::High).await;
        create_assigned_task(&server, &project, "Normal", &ada, TaskPriority::Medium).await;
        let low = create_assigned_task(&server, &project, "Someday", &ada, TaskPriority::Low).await;

        let response = server
            .post("/api/v1/rebalance")
            .add_header("X-User-Id", USER)
            .await;

        response.assert_status_ok();
        let report: SweepReport = response.json();
        assert_eq!(report.message, "Reassigned 1 task");
        assert_eq!(report.reassignments.len(), 1);
        assert_eq!(report.reassignments[0].task_id, low.id);
        assert_eq!(report.reassignments[0].from_member, "Ada");
        assert_eq!(report.reassignments[0].to_member, "Bob");

        let moved: Task = server
            .get(&format!("/api/v1/tasks/{}", low.id))
            .await
            .json();
        assert_eq!(moved.assigned_to, Some(bob.id));

        let entries: Vec<ActivityLog> = server
            .get("/api/v1/activity")
            .await
            .json();
        let entry = entries
            .iter()
            .find(|e| e.action == ACTION_TASK_REASSIGNED)
            .expect("missing reassignment entry");
        assert_eq!(entry.task_id, Some(low.id));
        assert_eq!(entry.user_id, USER);
        assert_eq!(
            entry.metadata.as_ref().map(|m| m["reason"].clone()),
            Some(json!("workload_rebalance"))
        );
    }

    #[tokio::test]
    async fn second_sweep_is_a_no_op() {
        let server = setup();
        let team = create_test_team(&server).await;
        let ada = create_test_member(&server, &team, "Ada", 1).await;
        create_test_member(&server, &team, "Bob", 3).await;
        let project = create_test_project(&server, &team).await;
        create_assigned_task(&server, &project, "One", &ada, TaskPriority::Low).await;
        create_assigned_task(&server, &project, "Two", &ada, TaskPriority::Low).await;

        let first: SweepReport = server
            .post("/api/v1/rebalance")
            .add_header("X-User-Id", USER)
            .await
            .json();
        assert_eq!(first.reassignments.len(), 1);

        let second: SweepReport = server
            .post("/api/v1/rebalance")
            .add_header("X-User-Id", USER)
            .await
            .json();
        assert!(second.reassignments.is_empty());
    }
}

mod activity {
    use super::*;

    #[tokio::test]
    async fn honours_limit() {
        let server = setup();
        let team = create_test_team(&server).await;
        let project = create_test_project(&server, &team).await;
        for title in ["One", "Two", "Three"] {
            server
                .post(&format!("/api/v1/projects/{}/tasks", project.id))
                .add_header("X-User-Id", USER)
                .json(&json!({ "title": title }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let entries: Vec<ActivityLog> = server
            .get("/api/v1/activity")
            .add_query_param("limit", 2)
            .await
            .json();

        assert_eq!(entries.len(), 2);
        assert!(entries[0].description.contains("Three"));
    }
}

mod security_auth {
    use super::*;
    use teamtask::api::create_router_with_security;
    use teamtask::api::middleware::SecurityConfig;

    fn setup_with_auth(api_key: &str) -> TestServer {
        let db = Database::open_memory().expect("Failed to create database");
        db.migrate().expect("Failed to migrate");
        let config = SecurityConfig::with_api_key(api_key);
        let app = create_router_with_security(db, config);
        TestServer::new(app).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn health_endpoint_is_accessible_without_auth() {
        let server = setup_with_auth("test-secret-key");

        server.get("/api/v1/health").await.assert_status_ok();
    }

    #[tokio::test]
    async fn protected_endpoint_requires_auth() {
        let server = setup_with_auth("test-secret-key");

        let response = server.get("/api/v1/teams").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_endpoint_accepts_valid_bearer_token() {
        let server = setup_with_auth("test-secret-key");

        let response = server
            .get("/api/v1/teams")
            .add_header("Authorization", "Bearer test-secret-key")
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn protected_endpoint_rejects_invalid_bearer_token() {
        let server = setup_with_auth("test-secret-key");

        let response = server
            .get("/api/v1/teams")
            .add_header("Authorization", "Bearer wrong-key")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn protected_endpoint_rejects_malformed_auth_header() {
        let server = setup_with_auth("test-secret-key");

        let response = server
            .get("/api/v1/teams")
            .add_header("Authorization", "Basic dXNlcjpwYXNz")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}

mod security_rate_limit {
    use super::*;
    use teamtask::api::create_router_with_security;
    use teamtask::api::middleware::SecurityConfig;

    #[tokio::test]
    async fn rejects_requests_over_the_limit() {
        let db = Database::open_memory().expect("Failed to create database");
        db.migrate().expect("Failed to migrate");
        let app = create_router_with_security(db, SecurityConfig::with_rate_limit(2));
        let server = TestServer::new(app).expect("Failed to create test server");

        server.get("/api/v1/teams").await.assert_status_ok();
        server.get("/api/v1/teams").await.assert_status_ok();
        server
            .get("/api/v1/teams")
            .await
            .assert_status(StatusCode::TOO_MANY_REQUESTS);
    }
}
