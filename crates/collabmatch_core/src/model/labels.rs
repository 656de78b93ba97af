//! Helpers for skill/interest/tag label lists.
//!
//! # Invariants
//! - Set views compare labels exactly (case-sensitive), matching how the
//!   scoring engine intersects skills.
//! - `split_label_input` never yields blank labels.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static LABEL_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid label separator regex"));

/// Splits comma-separated form input into trimmed, non-empty labels.
///
/// Input order is kept and duplicates are not removed.
pub fn split_label_input(input: &str) -> Vec<String> {
    LABEL_SEPARATOR_RE
        .split(input.trim())
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trims every label and drops the ones left empty.
pub fn normalize_labels(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

/// Deduplicated, sorted view over a label list.
pub fn label_set(labels: &[String]) -> BTreeSet<&str> {
    labels.iter().map(String::as_str).collect()
}

/// Returns whether `labels` holds `label` exactly.
pub fn contains_label(labels: &[String], label: &str) -> bool {
    labels.iter().any(|item| item == label)
}
