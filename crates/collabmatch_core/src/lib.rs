//! Core domain logic for CollabMatch.
//! This crate is the single source of truth for storage, matching and search.

pub mod config;
pub mod db;
pub mod logging;
pub mod matching;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use matching::score::{find_matches, score_pair, MatchCandidate, Overlap};
pub use model::event::{Event, EventId, NewEvent};
pub use model::labels::split_label_input;
pub use model::project::{NewProject, Project, ProjectId, ProjectStatus};
pub use model::user::{NewUser, User, UserId};
pub use model::validation::ValidationError;
pub use repo::event_repo::{EventRepository, SqliteEventRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use search::filter::{EventFilter, LookingFilter, UserFilter};
pub use search::substring::{search_all, SearchQuery, SearchResults};
pub use service::collab_service::{CollabService, SqliteCollabService};
pub use service::stats::CollabStats;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
