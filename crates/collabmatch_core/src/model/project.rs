//! Project domain model.
//!
//! # Invariants
//! - `status` is an open set; unknown values are kept verbatim.
//! - `owner_id` is a weak reference and may point at no existing user.

use crate::model::user::UserId;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned project identifier.
pub type ProjectId = i64;

/// Project lifecycle label.
///
/// Known values map to variants; anything else round-trips through `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    #[default]
    Planning,
    Active,
    InProgress,
    Completed,
    Archived,
    /// Unknown status text. Build it through `parse` so known values in any
    /// case land on their own variant.
    Other(String),
}

impl ProjectStatus {
    /// Storage/display form of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Archived => "archived",
            Self::Other(value) => value.as_str(),
        }
    }

    /// Parses a stored status; never fails.
    ///
    /// Known values match case-insensitively; other text is kept verbatim.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "planning" => Self::Planning,
            "active" => Self::Active,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            "archived" => Self::Archived,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ProjectStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ProjectStatus> for String {
    fn from(value: ProjectStatus) -> Self {
        value.as_str().to_string()
    }
}

/// Persisted project row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub owner_id: Option<UserId>,
    pub created_at: String,
}

/// Insert draft for a new project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub owner_id: Option<UserId>,
}

impl NewProject {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_owner(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Trims text fields. A blank custom status falls back to `Planning`.
    pub fn normalized(self) -> Self {
        let status = match self.status {
            ProjectStatus::Other(value) if value.trim().is_empty() => ProjectStatus::Planning,
            ProjectStatus::Other(value) => ProjectStatus::parse(value.trim()),
            known => known,
        };
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            status,
            owner_id: self.owner_id,
        }
    }

    /// Validates the draft before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, ValidationError::BlankTitle)
    }
}

#[cfg(test)]
mod tests {
    use super::{NewProject, ProjectStatus};

    #[test]
    fn status_round_trips_known_and_custom_values() {
        for raw in ["planning", "active", "in_progress", "completed", "archived"] {
            assert_eq!(ProjectStatus::parse(raw).as_str(), raw);
        }
        let custom = ProjectStatus::parse("on hold");
        assert_eq!(custom, ProjectStatus::Other("on hold".to_string()));
        assert_eq!(custom.to_string(), "on hold");
    }

    #[test]
    fn parse_matches_known_values_in_any_case() {
        assert_eq!(ProjectStatus::parse("Active"), ProjectStatus::Active);
        assert_eq!(ProjectStatus::parse("IN_PROGRESS"), ProjectStatus::InProgress);
        assert_eq!(
            ProjectStatus::parse("On Hold"),
            ProjectStatus::Other("On Hold".to_string())
        );
    }

    #[test]
    fn normalized_maps_padded_known_status_and_blank_status() {
        let padded = NewProject::new("x")
            .with_status(ProjectStatus::Other(" active ".to_string()))
            .normalized();
        assert_eq!(padded.status, ProjectStatus::Active);

        let blank = NewProject::new("x")
            .with_status(ProjectStatus::Other("  ".to_string()))
            .normalized();
        assert_eq!(blank.status, ProjectStatus::Planning);
    }

    #[test]
    fn status_serializes_as_plain_string() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
