//! Summary counts for the dashboard header.

use crate::repo::event_repo::EventRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::user_repo::UserRepository;
use crate::repo::RepoResult;
use serde::Serialize;
use std::collections::HashSet;

/// Store-wide summary counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CollabStats {
    pub total_users: u64,
    pub total_events: u64,
    /// Users with the looking-for-project flag set.
    pub looking_for_project: u64,
    pub total_projects: u64,
    /// Size of the exact-string union of every user's skills.
    pub unique_skills: u64,
}

/// Aggregates counts from the three repositories.
pub fn compute_stats<U, E, P>(users: &U, events: &E, projects: &P) -> RepoResult<CollabStats>
where
    U: UserRepository,
    E: EventRepository,
    P: ProjectRepository,
{
    let all_users = users.list_users()?;
    let unique_skills = all_users
        .iter()
        .flat_map(|user| user.skills.iter().map(String::as_str))
        .collect::<HashSet<_>>()
        .len();

    Ok(CollabStats {
        total_users: users.count_users()?,
        total_events: events.count_events()?,
        looking_for_project: users.count_looking_for_project()?,
        total_projects: projects.count_projects()?,
        unique_skills: u64::try_from(unique_skills).unwrap_or(u64::MAX),
    })
}
