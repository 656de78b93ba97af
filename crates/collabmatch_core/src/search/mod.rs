//! Substring search and list filtering over users, events and projects.
//!
//! # Responsibility
//! - Case-insensitive substring search across the three entity tables.
//! - Exact-label filters and the label catalog used by list screens.
//!
//! # Invariants
//! - Matching folds case with full Unicode mapping, not ASCII-only.
//! - Result order inside each bucket is the repository order, never
//!   relevance.

pub mod filter;
pub mod substring;
