//! Grouped substring search.
//!
//! # Invariants
//! - Blank queries return empty buckets without touching storage.
//! - Users are ordered by name, events by start date, projects newest first.

use crate::model::event::Event;
use crate::model::project::Project;
use crate::model::user::User;
use crate::repo::event_repo::EventRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoResult;
use log::{error, info};
use serde::Serialize;
use std::time::Instant;

/// Search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// User query text; trimmed before matching.
    pub text: String,
    /// Optional cap applied to each bucket separately.
    pub limit_per_kind: Option<usize>,
}

impl SearchQuery {
    /// Creates an unlimited query.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            limit_per_kind: None,
        }
    }
}

/// Search hits grouped by entity type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub users: Vec<User>,
    pub events: Vec<Event>,
    pub projects: Vec<Project>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.users.len() + self.events.len() + self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Lowercased query text used for substring tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Needle(String);

impl Needle {
    /// Returns `None` for blank text.
    pub fn new(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    pub fn found_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(self.0.as_str())
    }

    pub fn found_in_any(&self, haystacks: &[String]) -> bool {
        haystacks.iter().any(|value| self.found_in(value))
    }

    fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

/// Matches name, email, any skill, any interest or status.
pub fn user_matches(user: &User, needle: &Needle) -> bool {
    needle.found_in(&user.name)
        || user
            .email
            .as_deref()
            .is_some_and(|email| needle.found_in(email))
        || needle.found_in_any(&user.skills)
        || needle.found_in_any(&user.interests)
        || needle.found_in(&user.status)
}

/// Matches title, description, any tag or location.
pub fn event_matches(event: &Event, needle: &Needle) -> bool {
    needle.found_in(&event.title)
        || needle.found_in(&event.description)
        || needle.found_in_any(&event.tags)
        || needle.found_in(&event.location)
}

/// Matches title, description or status.
pub fn project_matches(project: &Project, needle: &Needle) -> bool {
    needle.found_in(&project.title)
        || needle.found_in(&project.description)
        || needle.found_in(project.status.as_str())
}

/// Searches all three tables and returns grouped hits.
///
/// Returns empty buckets for blank queries.
pub fn search_all<U, E, P>(
    users: &U,
    events: &E,
    projects: &P,
    query: &SearchQuery,
) -> RepoResult<SearchResults>
where
    U: UserRepository,
    E: EventRepository,
    P: ProjectRepository,
{
    let Some(needle) = Needle::new(&query.text) else {
        return Ok(SearchResults::default());
    };

    let started_at = Instant::now();
    let result = collect_hits(users, events, projects, &needle, query.limit_per_kind);
    match &result {
        Ok(hits) => info!(
            "event=search module=search status=ok query_chars={} users={} events={} projects={} duration_ms={}",
            needle.char_len(),
            hits.users.len(),
            hits.events.len(),
            hits.projects.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=search module=search status=error query_chars={} duration_ms={} error={}",
            needle.char_len(),
            started_at.elapsed().as_millis(),
            err
        ),
    }
    result
}

fn collect_hits<U, E, P>(
    users: &U,
    events: &E,
    projects: &P,
    needle: &Needle,
    limit: Option<usize>,
) -> RepoResult<SearchResults>
where
    U: UserRepository,
    E: EventRepository,
    P: ProjectRepository,
{
    let limit = limit.unwrap_or(usize::MAX);
    Ok(SearchResults {
        users: users
            .list_users()?
            .into_iter()
            .filter(|user| user_matches(user, needle))
            .take(limit)
            .collect(),
        events: events
            .list_events()?
            .into_iter()
            .filter(|event| event_matches(event, needle))
            .take(limit)
            .collect(),
        projects: projects
            .list_projects()?
            .into_iter()
            .filter(|project| project_matches(project, needle))
            .take(limit)
            .collect(),
    })
}
