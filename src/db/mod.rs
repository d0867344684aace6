mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use rusqlite::{Connection, Row};
use uuid::Uuid;

use crate::models::*;
use crate::workload::WorkloadStore;

const TASK_COLUMNS: &str =
    "id, project_id, title, description, assigned_to, priority, status, due_date, created_at, updated_at";

const MEMBER_COLUMNS: &str = "id, team_id, name, role, capacity, created_at, updated_at";

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(default_path()?)
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Team operations
    // ============================================================

    pub fn get_all_teams(&self) -> Result<Vec<Team>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        query_teams(&conn)
    }

    pub fn get_team(&self, id: Uuid) -> Result<Option<Team>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        query_team(&conn, id)
    }

    pub fn create_team(&self, input: CreateTeamInput) -> Result<Team> {
        require_text("name", &input.name)?;

        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO teams (id, name, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.name,
                &input.description,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Team {
            id,
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_team(&self, id: Uuid, input: UpdateTeamInput) -> Result<Option<Team>> {
        let Some(existing) = self.get_team(id)? else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            require_text("name", name)?;
        }

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let name = input.name.unwrap_or(existing.name);
        let description = input.description.or(existing.description);

        conn.execute(
            "UPDATE teams SET name = ?, description = ?, updated_at = ? WHERE id = ?",
            (&name, &description, now.to_rfc3339(), id.to_string()),
        )?;

        Ok(Some(Team {
            id,
            name,
            description,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    pub fn delete_team(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM teams WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    pub fn get_team_details(&self, id: Uuid) -> Result<Option<TeamDetails>> {
        let team = match self.get_team(id)? {
            Some(t) => t,
            None => return Ok(None),
        };

        let members = self.get_team_members(id)?;
        let projects = self.get_team_projects(id)?;

        Ok(Some(TeamDetails {
            team,
            members,
            projects,
        }))
    }

    // ============================================================
    // Member operations
    // ============================================================

    pub fn get_team_members(&self, team_id: Uuid) -> Result<Vec<TeamMember>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        query_members(&conn, team_id)
    }

    pub fn get_member(&self, id: Uuid) -> Result<Option<TeamMember>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        query_member(&conn, id)
    }

    pub fn create_member(&self, team_id: Uuid, input: CreateMemberInput) -> Result<TeamMember> {
        require_text("name", &input.name)?;
        check_capacity(input.capacity)?;
        self.get_team(team_id)?
            .ok_or_else(|| anyhow::anyhow!("Team not found"))?;

        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO team_members (id, team_id, name, role, capacity, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                team_id.to_string(),
                &input.name,
                &input.role,
                input.capacity,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(TeamMember {
            id,
            team_id,
            name: input.name,
            role: input.role,
            capacity: input.capacity,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_member(&self, id: Uuid, input: UpdateMemberInput) -> Result<Option<TeamMember>> {
        let Some(existing) = self.get_member(id)? else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            require_text("name", name)?;
        }
        if let Some(capacity) = input.capacity {
            check_capacity(capacity)?;
        }

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let name = input.name.unwrap_or(existing.name);
        let role = input.role.unwrap_or(existing.role);
        let capacity = input.capacity.unwrap_or(existing.capacity);

        conn.execute(
            "UPDATE team_members SET name = ?, role = ?, capacity = ?, updated_at = ? WHERE id = ?",
            (&name, &role, capacity, now.to_rfc3339(), id.to_string()),
        )?;

        Ok(Some(TeamMember {
            id,
            team_id: existing.team_id,
            name,
            role,
            capacity,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    /// Remove a member. Their tasks stay in place, unassigned.
    pub fn delete_member(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM team_members WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Project operations
    // ============================================================

    pub fn get_team_projects(&self, team_id: Uuid) -> Result<Vec<Project>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, team_id, name, description, created_at, updated_at
             FROM projects WHERE team_id = ? ORDER BY name",
        )?;

        let projects = stmt
            .query_map([team_id.to_string()], |row| {
                Ok(Project {
                    id: parse_uuid(row.get::<_, String>(0)?),
                    team_id: parse_uuid(row.get::<_, String>(1)?),
                    name: row.get(2)?,
                    description: row.get(3)?,
                    created_at: parse_datetime(row.get::<_, String>(4)?),
                    updated_at: parse_datetime(row.get::<_, String>(5)?),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(projects)
    }

    pub fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, team_id, name, description, created_at, updated_at
             FROM projects WHERE id = ?",
        )?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Project {
                id: parse_uuid(row.get::<_, String>(0)?),
                team_id: parse_uuid(row.get::<_, String>(1)?),
                name: row.get(2)?,
                description: row.get(3)?,
                created_at: parse_datetime(row.get::<_, String>(4)?),
                updated_at: parse_datetime(row.get::<_, String>(5)?),
            }))
        } else {
            Ok(None)
        }
    }

    pub fn create_project(&self, team_id: Uuid, input: CreateProjectInput) -> Result<Project> {
        require_text("name", &input.name)?;
        self.get_team(team_id)?
            .ok_or_else(|| anyhow::anyhow!("Team not found"))?;

        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO projects (id, team_id, name, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                team_id.to_string(),
                &input.name,
                &input.description,
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Project {
            id,
            team_id,
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_project(&self, id: Uuid, input: UpdateProjectInput) -> Result<Option<Project>> {
        let Some(existing) = self.get_project(id)? else {
            return Ok(None);
        };
        if let Some(name) = &input.name {
            require_text("name", name)?;
        }

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let name = input.name.unwrap_or(existing.name);
        let description = input.description.or(existing.description);

        conn.execute(
            "UPDATE projects SET name = ?, description = ?, updated_at = ? WHERE id = ?",
            (&name, &description, now.to_rfc3339(), id.to_string()),
        )?;

        Ok(Some(Project {
            id,
            team_id: existing.team_id,
            name,
            description,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    pub fn delete_project(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM projects WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Task operations
    // ============================================================

    pub fn get_task(&self, id: Uuid) -> Result<Option<Task>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(&format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(task_from_row(row)?))
        } else {
            Ok(None)
        }
    }

    pub fn get_project_tasks(&self, project_id: Uuid) -> Result<Vec<Task>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tasks WHERE project_id = ? ORDER BY rowid",
            TASK_COLUMNS
        ))?;

        let tasks = stmt
            .query_map([project_id.to_string()], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    /// Every task assigned to a member, done ones included.
    pub fn get_member_tasks(&self, member_id: Uuid) -> Result<Vec<Task>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM tasks WHERE assigned_to = ? ORDER BY rowid",
            TASK_COLUMNS
        ))?;

        let tasks = stmt
            .query_map([member_id.to_string()], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tasks)
    }

    /// Insert a task as given.
    ///
    /// `input.assigned_to` is written verbatim; capacity checks happen in
    /// [`crate::workload::choose_assignee`] before this is called.
    pub fn create_task(&self, project_id: Uuid, input: CreateTaskInput) -> Result<Task> {
        require_text("title", &input.title)?;
        self.get_project(project_id)?
            .ok_or_else(|| anyhow::anyhow!("Project not found"))?;

        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();
        let priority = input.priority.unwrap_or_default();
        let status = input.status.unwrap_or_default();

        conn.execute(
            "INSERT INTO tasks (id, project_id, title, description, assigned_to, priority, status, due_date, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                project_id.to_string(),
                &input.title,
                &input.description,
                input.assigned_to.map(|u| u.to_string()),
                priority.as_str(),
                status.as_str(),
                input.due_date.map(format_date),
                now.to_rfc3339(),
                now.to_rfc3339(),
            ),
        )?;

        Ok(Task {
            id,
            project_id,
            title: input.title,
            description: input.description,
            assigned_to: input.assigned_to,
            priority,
            status,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn update_task(&self, id: Uuid, changes: TaskChanges) -> Result<Option<Task>> {
        let Some(existing) = self.get_task(id)? else {
            return Ok(None);
        };
        if let Some(title) = &changes.title {
            require_text("title", title)?;
        }

        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();
        let title = changes.title.unwrap_or(existing.title);
        let description = changes.description.unwrap_or(existing.description);
        let assigned_to = changes.assigned_to.unwrap_or(existing.assigned_to);
        let priority = changes.priority.unwrap_or(existing.priority);
        let status = changes.status.unwrap_or(existing.status);
        let due_date = changes.due_date.unwrap_or(existing.due_date);

        conn.execute(
            "UPDATE tasks SET title = ?, description = ?, assigned_to = ?, priority = ?, status = ?, due_date = ?, updated_at = ?
             WHERE id = ?",
            (
                &title,
                &description,
                assigned_to.map(|u| u.to_string()),
                priority.as_str(),
                status.as_str(),
                due_date.map(format_date),
                now.to_rfc3339(),
                id.to_string(),
            ),
        )?;

        Ok(Some(Task {
            id,
            project_id: existing.project_id,
            title,
            description,
            assigned_to,
            priority,
            status,
            due_date,
            created_at: existing.created_at,
            updated_at: now,
        }))
    }

    pub fn delete_task(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM tasks WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Activity log operations
    // ============================================================

    pub fn create_activity(&self, input: CreateActivityInput) -> Result<ActivityLog> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let id = Uuid::new_v4();
        let now = Utc::now();

        let metadata_json = input
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        conn.execute(
            "INSERT INTO activity_logs (id, action, description, task_id, user_id, metadata, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                id.to_string(),
                &input.action,
                &input.description,
                input.task_id.map(|u| u.to_string()),
                &input.user_id,
                &metadata_json,
                now.to_rfc3339(),
            ),
        )?;

        Ok(ActivityLog {
            id,
            action: input.action,
            description: input.description,
            task_id: input.task_id,
            user_id: input.user_id,
            metadata: input.metadata,
            created_at: now,
        })
    }

    /// Most recent activity first.
    pub fn get_recent_activity(&self, limit: u32) -> Result<Vec<ActivityLog>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, action, description, task_id, user_id, metadata, created_at
             FROM activity_logs ORDER BY rowid DESC LIMIT ?",
        )?;

        let entries = stmt
            .query_map([limit], activity_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// Activity for one task, oldest first.
    pub fn get_task_activity(&self, task_id: Uuid) -> Result<Vec<ActivityLog>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT id, action, description, task_id, user_id, metadata, created_at
             FROM activity_logs WHERE task_id = ? ORDER BY rowid",
        )?;

        let entries = stmt
            .query_map([task_id.to_string()], activity_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }
}

// ============================================================
// Workload views
// ============================================================

impl WorkloadStore for Database {
    fn team_workload(&self, team_id: Uuid) -> Result<Option<TeamWorkload>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let Some(team) = query_team(&conn, team_id)? else {
            return Ok(None);
        };
        Ok(Some(build_team_workload(&conn, team)?))
    }

    fn member_workload(&self, member_id: Uuid) -> Result<Option<MemberWorkload>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let Some(member) = query_member(&conn, member_id)? else {
            return Ok(None);
        };
        let tasks = query_open_tasks(&conn, member.id)?;
        Ok(Some(MemberWorkload { member, tasks }))
    }

    fn all_team_workloads(&self) -> Result<Vec<TeamWorkload>> {
        // One lock for the whole read so the sweep sees a consistent snapshot.
        let conn = self.conn.lock().expect("database lock poisoned");
        query_teams(&conn)?
            .into_iter()
            .map(|team| build_team_workload(&conn, team))
            .collect()
    }

    fn reassign_task(&self, task_id: Uuid, from: Uuid, to: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let to = to.to_string();
        let rows = conn.execute(
            "UPDATE tasks SET assigned_to = ?1, updated_at = ?2
             WHERE id = ?3 AND assigned_to = ?4 AND status != 'done'
               AND (SELECT COUNT(*) FROM tasks WHERE assigned_to = ?1 AND status != 'done')
                   < (SELECT capacity FROM team_members WHERE id = ?1)",
            (&to, Utc::now().to_rfc3339(), task_id.to_string(), from.to_string()),
        )?;
        Ok(rows > 0)
    }

    fn record_activity(&self, input: CreateActivityInput) -> Result<ActivityLog> {
        self.create_activity(input)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}

fn default_path() -> Result<PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", "teamtask")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(dirs.data_dir().join("teamtask.db"))
}

fn query_teams(conn: &Connection) -> Result<Vec<Team>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, created_at, updated_at
         FROM teams ORDER BY name, rowid",
    )?;

    let teams = stmt
        .query_map([], team_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(teams)
}

fn query_team(conn: &Connection, id: Uuid) -> Result<Option<Team>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, description, created_at, updated_at
         FROM teams WHERE id = ?",
    )?;

    let mut rows = stmt.query([id.to_string()])?;
    match rows.next()? {
        Some(row) => Ok(Some(team_from_row(row)?)),
        None => Ok(None),
    }
}

/// Members in the order they joined the team.
fn query_members(conn: &Connection, team_id: Uuid) -> Result<Vec<TeamMember>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM team_members WHERE team_id = ? ORDER BY rowid",
        MEMBER_COLUMNS
    ))?;

    let members = stmt
        .query_map([team_id.to_string()], member_from_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(members)
}

fn query_member(conn: &Connection, id: Uuid) -> Result<Option<TeamMember>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM team_members WHERE id = ?",
        MEMBER_COLUMNS
    ))?;

    let mut rows = stmt.query([id.to_string()])?;
    match rows.next()? {
        Some(row) => Ok(Some(member_from_row(row)?)),
        None => Ok(None),
    }
}

fn query_open_tasks(conn: &Connection, member_id: Uuid) -> Result<Vec<OpenTask>> {
    let mut stmt = conn.prepare(
        "SELECT id, title, priority, status FROM tasks
         WHERE assigned_to = ? AND status != 'done' ORDER BY rowid",
    )?;

    let tasks = stmt
        .query_map([member_id.to_string()], |row| {
            Ok(OpenTask {
                id: parse_uuid(row.get::<_, String>(0)?),
                title: row.get(1)?,
                priority: TaskPriority::from_str(&row.get::<_, String>(2)?).unwrap_or_default(),
                status: TaskStatus::from_str(&row.get::<_, String>(3)?).unwrap_or_default(),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(tasks)
}

fn build_team_workload(conn: &Connection, team: Team) -> Result<TeamWorkload> {
    let members = query_members(conn, team.id)?
        .into_iter()
        .map(|member| -> Result<MemberWorkload> {
            let tasks = query_open_tasks(conn, member.id)?;
            Ok(MemberWorkload { member, tasks })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TeamWorkload { team, members })
}

fn team_from_row(row: &Row<'_>) -> rusqlite::Result<Team> {
    Ok(Team {
        id: parse_uuid(row.get::<_, String>(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: parse_datetime(row.get::<_, String>(3)?),
        updated_at: parse_datetime(row.get::<_, String>(4)?),
    })
}

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<TeamMember> {
    Ok(TeamMember {
        id: parse_uuid(row.get::<_, String>(0)?),
        team_id: parse_uuid(row.get::<_, String>(1)?),
        name: row.get(2)?,
        role: row.get(3)?,
        capacity: row.get(4)?,
        created_at: parse_datetime(row.get::<_, String>(5)?),
        updated_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: parse_uuid(row.get::<_, String>(0)?),
        project_id: parse_uuid(row.get::<_, String>(1)?),
        title: row.get(2)?,
        description: row.get(3)?,
        assigned_to: row.get::<_, Option<String>>(4)?.map(parse_uuid),
        priority: TaskPriority::from_str(&row.get::<_, String>(5)?).unwrap_or_default(),
        status: TaskStatus::from_str(&row.get::<_, String>(6)?).unwrap_or_default(),
        due_date: row.get::<_, Option<String>>(7)?.and_then(parse_date),
        created_at: parse_datetime(row.get::<_, String>(8)?),
        updated_at: parse_datetime(row.get::<_, String>(9)?),
    })
}

fn activity_from_row(row: &Row<'_>) -> rusqlite::Result<ActivityLog> {
    Ok(ActivityLog {
        id: parse_uuid(row.get::<_, String>(0)?),
        action: row.get(1)?,
        description: row.get(2)?,
        task_id: row.get::<_, Option<String>>(3)?.map(parse_uuid),
        user_id: row.get(4)?,
        metadata: row
            .get::<_, Option<String>>(5)?
            .and_then(|s| serde_json::from_str(&s).ok()),
        created_at: parse_datetime(row.get::<_, String>(6)?),
    })
}

fn parse_uuid(s: String) -> Uuid {
    Uuid::parse_str(&s).unwrap_or_else(|_| Uuid::nil())
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

fn parse_date(s: String) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
