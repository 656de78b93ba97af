//! Collaboration use-case service.
//!
//! # Responsibility
//! - Expose the operations the presentation layer calls: listing, matching,
//!   search, statistics and inserts.
//! - Normalize form input before it reaches repository validation.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::matching::score::{find_matches, MatchCandidate};
use crate::model::event::{Event, EventId, NewEvent};
use crate::model::project::{NewProject, Project, ProjectId};
use crate::model::user::{NewUser, User, UserId};
use crate::repo::event_repo::{EventRepository, SqliteEventRepository};
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::user_repo::{SqliteUserRepository, UserRepository};
use crate::repo::RepoResult;
use crate::search::filter::{filter_events, filter_users, label_catalog, EventFilter, UserFilter};
use crate::search::substring::{search_all, SearchQuery, SearchResults};
use crate::service::stats::{compute_stats, CollabStats};
use log::info;
use rusqlite::Connection;

/// Facade over the user, event and project repositories.
pub struct CollabService<U, E, P> {
    users: U,
    events: E,
    projects: P,
}

/// Service wired to SQLite repositories sharing one connection.
pub type SqliteCollabService<'conn> = CollabService<
    SqliteUserRepository<'conn>,
    SqliteEventRepository<'conn>,
    SqliteProjectRepository<'conn>,
>;

impl<'conn> SqliteCollabService<'conn> {
    /// Builds all three repositories over a migrated connection.
    pub fn from_connection(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteUserRepository::try_new(conn)?,
            SqliteEventRepository::try_new(conn)?,
            SqliteProjectRepository::try_new(conn)?,
        ))
    }
}

impl<U, E, P> CollabService<U, E, P>
where
    U: UserRepository,
    E: EventRepository,
    P: ProjectRepository,
{
    /// Creates a service using the provided repository implementations.
    pub fn new(users: U, events: E, projects: P) -> Self {
        Self {
            users,
            events,
            projects,
        }
    }

    /// Lists all users ordered by name.
    pub fn list_users(&self) -> RepoResult<Vec<User>> {
        self.users.list_users()
    }

    /// Gets one user by id.
    pub fn get_user(&self, id: UserId) -> RepoResult<Option<User>> {
        self.users.get_user(id)
    }

    /// Lists all events ordered by start date.
    pub fn list_events(&self) -> RepoResult<Vec<Event>> {
        self.events.list_events()
    }

    /// Lists all projects, newest first.
    pub fn list_projects(&self) -> RepoResult<Vec<Project>> {
        self.projects.list_projects()
    }

    /// Ranks collaborators for `user_id`.
    ///
    /// Fails with `RepoError::NotFound` for unknown ids.
    pub fn find_matches(&self, user_id: UserId) -> RepoResult<Vec<MatchCandidate>> {
        find_matches(&self.users, user_id)
    }

    /// Runs grouped substring search; blank text yields empty buckets.
    pub fn search(&self, query: &SearchQuery) -> RepoResult<SearchResults> {
        search_all(&self.users, &self.events, &self.projects, query)
    }

    /// Computes dashboard counts.
    pub fn get_stats(&self) -> RepoResult<CollabStats> {
        compute_stats(&self.users, &self.events, &self.projects)
    }

    /// Lists users accepted by `filter`, ordered by name.
    pub fn filter_users(&self, filter: &UserFilter) -> RepoResult<Vec<User>> {
        Ok(filter_users(self.users.list_users()?, filter))
    }

    /// Lists events accepted by `filter`, ordered by start date.
    pub fn filter_events(&self, filter: &EventFilter) -> RepoResult<Vec<Event>> {
        Ok(filter_events(self.events.list_events()?, filter))
    }

    /// Sorted union of all skills and event tags, for filter pickers.
    pub fn label_catalog(&self) -> RepoResult<Vec<String>> {
        let users = self.users.list_users()?;
        let events = self.events.list_events()?;
        Ok(label_catalog(&users, &events))
    }

    /// Normalizes and inserts a user, returning its new id.
    pub fn add_user(&self, user: NewUser) -> RepoResult<UserId> {
        let id = self.users.create_user(&user.normalized())?;
        info!("event=user_create module=service status=ok user_id={id}");
        Ok(id)
    }

    /// Normalizes and inserts an event, returning its new id.
    pub fn add_event(&self, event: NewEvent) -> RepoResult<EventId> {
        let id = self.events.create_event(&event.normalized())?;
        info!("event=event_create module=service status=ok event_id={id}");
        Ok(id)
    }

    /// Normalizes and inserts a project, returning its new id.
    ///
    /// The owner id is not checked against existing users.
    pub fn add_project(&self, project: NewProject) -> RepoResult<ProjectId> {
        let id = self.projects.create_project(&project.normalized())?;
        info!("event=project_create module=service status=ok project_id={id}");
        Ok(id)
    }
}
