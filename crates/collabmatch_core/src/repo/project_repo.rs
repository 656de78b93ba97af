//! Project repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `owner_id` is stored without a foreign key; dangling owners are kept.
//! - `list_projects` order is `created_at DESC, id DESC`.

use crate::model::project::{NewProject, Project, ProjectId, ProjectStatus};
use crate::repo::{count_rows, ensure_connection_ready, RepoResult};
use rusqlite::{params, Connection, Row};

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    status,
    owner_id,
    created_at
FROM projects";

const PROJECT_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "status",
    "owner_id",
    "created_at",
];

/// Repository interface for the `projects` table.
pub trait ProjectRepository {
    fn create_project(&self, project: &NewProject) -> RepoResult<ProjectId>;
    /// All projects, newest first.
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
    fn count_projects(&self) -> RepoResult<u64>;
}

/// SQLite-backed project repository.
pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "projects", PROJECT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &NewProject) -> RepoResult<ProjectId> {
        project.validate()?;

        self.conn.execute(
            "INSERT INTO projects (title, description, status, owner_id)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                project.title.as_str(),
                project.description.as_str(),
                project.status.as_str(),
                project.owner_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} ORDER BY created_at DESC, id DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();

        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }

        Ok(projects)
    }

    fn count_projects(&self) -> RepoResult<u64> {
        count_rows(self.conn, "SELECT COUNT(*) FROM projects;")
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let status = row
        .get::<_, Option<String>>("status")?
        .map_or(ProjectStatus::Planning, |value| ProjectStatus::parse(&value));

    Ok(Project {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row
            .get::<_, Option<String>>("description")?
            .unwrap_or_default(),
        status,
        owner_id: row.get("owner_id")?,
        created_at: row.get("created_at")?,
    })
}
