//! Event repository contracts and SQLite implementation.
//!
//! # Invariants
//! - `list_events` order is `start_date ASC, id ASC` (text comparison).
//! - `capacity` maps to the `max_participants` column.

use crate::model::event::{Event, EventId, NewEvent};
use crate::repo::{
    count_rows, decode_labels, encode_labels, ensure_connection_ready, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const EVENT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    start_date,
    end_date,
    location,
    tags,
    max_participants,
    created_at
FROM events";

const EVENT_COLUMNS: &[&str] = &[
    "id",
    "title",
    "description",
    "start_date",
    "end_date",
    "location",
    "tags",
    "max_participants",
    "created_at",
];

/// Repository interface for the `events` table.
pub trait EventRepository {
    fn create_event(&self, event: &NewEvent) -> RepoResult<EventId>;
    /// All events ordered by start date, then id.
    fn list_events(&self) -> RepoResult<Vec<Event>>;
    fn count_events(&self) -> RepoResult<u64>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "events", EVENT_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &NewEvent) -> RepoResult<EventId> {
        event.validate()?;

        self.conn.execute(
            "INSERT INTO events (
                title,
                description,
                start_date,
                end_date,
                location,
                tags,
                max_participants
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                event.title.as_str(),
                event.description.as_str(),
                event.start_date.as_str(),
                event.end_date.as_str(),
                event.location.as_str(),
                encode_labels(&event.tags)?,
                i64::from(event.capacity),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn list_events(&self) -> RepoResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL} ORDER BY start_date ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }

    fn count_events(&self) -> RepoResult<u64> {
        count_rows(self.conn, "SELECT COUNT(*) FROM events;")
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let tags_text: String = row.get("tags")?;
    let max_participants: i64 = row.get("max_participants")?;
    let capacity = u32::try_from(max_participants).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid capacity `{max_participants}` in events.max_participants"
        ))
    })?;

    Ok(Event {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row
            .get::<_, Option<String>>("description")?
            .unwrap_or_default(),
        start_date: row
            .get::<_, Option<String>>("start_date")?
            .unwrap_or_default(),
        end_date: row
            .get::<_, Option<String>>("end_date")?
            .unwrap_or_default(),
        location: row
            .get::<_, Option<String>>("location")?
            .unwrap_or_default(),
        tags: decode_labels(&tags_text, "events.tags")?,
        capacity,
        created_at: row.get("created_at")?,
    })
}
