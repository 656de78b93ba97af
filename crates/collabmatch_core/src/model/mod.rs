//! Domain records for users, events and projects.
//!
//! # Responsibility
//! - Define typed records read from storage and insert drafts written to it.
//! - Validate drafts before any SQL runs.
//!
//! # Invariants
//! - Identifiers are assigned by storage and never change afterwards.
//! - Label lists (skills, interests, tags) keep input order and may carry
//!   duplicates; set semantics apply only when scoring.

pub mod event;
pub mod labels;
pub mod project;
pub mod user;
pub mod validation;
