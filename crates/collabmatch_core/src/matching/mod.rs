//! Collaborator matching by shared skills and interests.
//!
//! # Responsibility
//! - Score one target user against every other user.
//! - Rank candidates by overlap score.
//!
//! # Invariants
//! - Scoring is symmetric: `score(a, b) == score(b, a)`.
//! - Candidates with no shared skill and no shared interest are never
//!   returned, whatever their bonus.
//! - Matching is read-only.

pub mod score;
