//! Overlap scoring and ranking.
//!
//! Score weights:
//! - 10 points per distinct shared skill.
//! - 5 points per distinct shared interest.
//! - 20 points when both users are looking for a project.
//!
//! Labels are compared exactly; `"python"` and `"Python"` do not overlap.

use crate::model::labels::label_set;
use crate::model::user::{User, UserId};
use crate::repo::user_repo::UserRepository;
use crate::repo::{RepoError, RepoResult};
use log::{error, info};
use serde::Serialize;
use std::time::Instant;

pub const SHARED_SKILL_POINTS: u32 = 10;
pub const SHARED_INTEREST_POINTS: u32 = 5;
pub const LOOKING_FOR_PROJECT_BONUS: u32 = 20;

/// One ranked candidate for a target user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchCandidate {
    pub user: User,
    pub score: u32,
    /// Distinct shared skills, sorted ascending.
    pub shared_skills: Vec<String>,
    /// Distinct shared interests, sorted ascending.
    pub shared_interests: Vec<String>,
}

/// Overlap between two users, independent of which one is the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlap {
    pub score: u32,
    pub shared_skills: Vec<String>,
    pub shared_interests: Vec<String>,
}

/// Computes the overlap of two users.
///
/// Returns `None` when they share neither a skill nor an interest.
pub fn score_pair(a: &User, b: &User) -> Option<Overlap> {
    let shared_skills = intersect(&a.skills, &b.skills);
    let shared_interests = intersect(&a.interests, &b.interests);
    if shared_skills.is_empty() && shared_interests.is_empty() {
        return None;
    }

    let mut score = points(shared_skills.len(), SHARED_SKILL_POINTS)
        .saturating_add(points(shared_interests.len(), SHARED_INTEREST_POINTS));
    if a.looking_for_project && b.looking_for_project {
        score = score.saturating_add(LOOKING_FOR_PROJECT_BONUS);
    }

    Some(Overlap {
        score,
        shared_skills,
        shared_interests,
    })
}

/// Ranks `candidates` against `target`, best score first.
///
/// The target itself (same id) is skipped. Equal scores keep the order of
/// `candidates`.
pub fn rank_candidates(target: &User, candidates: Vec<User>) -> Vec<MatchCandidate> {
    let mut matches = candidates
        .into_iter()
        .filter(|candidate| candidate.id != target.id)
        .filter_map(|candidate| {
            score_pair(target, &candidate).map(|overlap| MatchCandidate {
                user: candidate,
                score: overlap.score,
                shared_skills: overlap.shared_skills,
                shared_interests: overlap.shared_interests,
            })
        })
        .collect::<Vec<_>>();

    // Stable: ties stay in input order.
    matches.sort_by(|left, right| right.score.cmp(&left.score));
    matches
}

/// Finds ranked collaborators for one stored user.
///
/// Candidates are read through `list_users`, so equal scores are ordered by
/// name, then id.
///
/// # Errors
/// - `RepoError::NotFound` when `user_id` does not resolve to a user.
/// - Storage errors from the repository, unchanged.
pub fn find_matches<R: UserRepository>(
    repo: &R,
    user_id: UserId,
) -> RepoResult<Vec<MatchCandidate>> {
    let started_at = Instant::now();
    let result = load_and_rank(repo, user_id);

    match &result {
        Ok(matches) => info!(
            "event=find_matches module=matching status=ok user_id={} matches={} duration_ms={}",
            user_id,
            matches.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=find_matches module=matching status=error user_id={} duration_ms={} error={}",
            user_id,
            started_at.elapsed().as_millis(),
            err
        ),
    }

    result
}

fn load_and_rank<R: UserRepository>(
    repo: &R,
    user_id: UserId,
) -> RepoResult<Vec<MatchCandidate>> {
    let target = repo.get_user(user_id)?.ok_or(RepoError::NotFound {
        entity: "user",
        id: user_id,
    })?;
    Ok(rank_candidates(&target, repo.list_users()?))
}

fn intersect(left: &[String], right: &[String]) -> Vec<String> {
    let right = label_set(right);
    label_set(left)
        .intersection(&right)
        .map(|label| (*label).to_string())
        .collect()
}

fn points(count: usize, weight: u32) -> u32 {
    u32::try_from(count)
        .unwrap_or(u32::MAX)
        .saturating_mul(weight)
}
