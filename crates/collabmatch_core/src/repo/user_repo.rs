//! User repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Insert and read rows of the `users` table.
//! - Translate JSON skill/interest columns into label lists.
//!
//! # Invariants
//! - `list_users` order is `name ASC, id ASC`; scoring ties rely on it.
//! - Read paths reject undecodable rows instead of masking them.

use crate::model::user::{NewUser, User, UserId};
use crate::repo::{
    bool_to_int, count_rows, decode_labels, encode_labels, ensure_connection_ready, int_to_bool,
    RepoResult,
};
use rusqlite::{params, Connection, OptionalExtension, Row};

const USER_SELECT_SQL: &str = "SELECT
    id,
    name,
    email,
    skills,
    interests,
    status,
    looking_for_project,
    created_at
FROM users";

const USER_COLUMNS: &[&str] = &[
    "id",
    "name",
    "email",
    "skills",
    "interests",
    "status",
    "looking_for_project",
    "created_at",
];

/// Repository interface for the `users` table.
pub trait UserRepository {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId>;
    fn get_user(&self, id: UserId) -> RepoResult<Option<User>>;
    /// All users ordered by name, then id.
    fn list_users(&self) -> RepoResult<Vec<User>>;
    fn count_users(&self) -> RepoResult<u64>;
    fn count_looking_for_project(&self) -> RepoResult<u64>;
}

/// SQLite-backed user repository.
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "users", USER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, user: &NewUser) -> RepoResult<UserId> {
        user.validate()?;

        self.conn.execute(
            "INSERT INTO users (
                name,
                email,
                skills,
                interests,
                status,
                looking_for_project
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                user.name.as_str(),
                user.email.as_deref(),
                encode_labels(&user.skills)?,
                encode_labels(&user.interests)?,
                user.status.as_str(),
                bool_to_int(user.looking_for_project),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE id = ?1;"))?;
        let raw = stmt.query_row([id], RawUser::from_row).optional()?;
        raw.map(RawUser::decode).transpose()
    }

    fn list_users(&self) -> RepoResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} ORDER BY name ASC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(RawUser::from_row(row)?.decode()?);
        }

        Ok(users)
    }

    fn count_users(&self) -> RepoResult<u64> {
        count_rows(self.conn, "SELECT COUNT(*) FROM users;")
    }

    fn count_looking_for_project(&self) -> RepoResult<u64> {
        count_rows(
            self.conn,
            "SELECT COUNT(*) FROM users WHERE looking_for_project = 1;",
        )
    }
}

// Column values as read, before JSON/flag decoding.
struct RawUser {
    id: UserId,
    name: String,
    email: Option<String>,
    skills: String,
    interests: String,
    status: Option<String>,
    looking_for_project: i64,
    created_at: String,
}

impl RawUser {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            email: row.get("email")?,
            skills: row.get("skills")?,
            interests: row.get("interests")?,
            status: row.get("status")?,
            looking_for_project: row.get("looking_for_project")?,
            created_at: row.get("created_at")?,
        })
    }

    fn decode(self) -> RepoResult<User> {
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            skills: decode_labels(&self.skills, "users.skills")?,
            interests: decode_labels(&self.interests, "users.interests")?,
            status: self.status.unwrap_or_default(),
            looking_for_project: int_to_bool(
                self.looking_for_project,
                "users.looking_for_project",
            )?,
            created_at: self.created_at,
        })
    }
}
