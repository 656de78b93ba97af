//! User domain model.
//!
//! # Responsibility
//! - Define the stored user record and its insert draft.
//!
//! # Invariants
//! - `id` is assigned by storage and is unique.
//! - `name` is never blank for persisted users created through the core.

use crate::model::labels::normalize_labels;
use crate::model::validation::{require_labels, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned user identifier.
pub type UserId = i64;

/// Persisted user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    /// Skills in input order; duplicates are kept as stored.
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    /// Free-text collaboration status, e.g. "open to collaborations".
    pub status: String,
    pub looking_for_project: bool,
    /// `YYYY-MM-DD HH:MM:SS` in UTC, assigned by storage.
    pub created_at: String,
}

/// Insert draft for a new user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub status: String,
    pub looking_for_project: bool,
}

impl NewUser {
    /// Creates a draft with only the required name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn looking_for_project(mut self, looking: bool) -> Self {
        self.looking_for_project = looking;
        self
    }

    /// Trims text fields, maps a blank email to `None` and drops blank labels.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self
                .email
                .map(|email| email.trim().to_string())
                .filter(|email| !email.is_empty()),
            skills: normalize_labels(&self.skills),
            interests: normalize_labels(&self.interests),
            status: self.status.trim().to_string(),
            looking_for_project: self.looking_for_project,
        }
    }

    /// Validates the draft before persistence.
    ///
    /// # Errors
    /// - `BlankName` when `name` is empty after trim.
    /// - `BlankLabel` when a skill or interest entry is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.name, ValidationError::BlankName)?;
        require_labels(&self.skills, "skills")?;
        require_labels(&self.interests, "interests")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NewUser;
    use crate::model::validation::ValidationError;

    #[test]
    fn validate_rejects_blank_name() {
        let draft = NewUser::new("   ");
        assert_eq!(draft.validate(), Err(ValidationError::BlankName));
    }

    #[test]
    fn validate_rejects_blank_skill() {
        let draft = NewUser::new("Ivan").with_skills(["Python", " "]);
        assert_eq!(
            draft.validate(),
            Err(ValidationError::BlankLabel { field: "skills" })
        );
    }

    #[test]
    fn normalized_trims_fields_and_drops_blank_email() {
        let draft = NewUser::new("  Ivan ")
            .with_email("   ")
            .with_skills([" Python ", ""])
            .with_status(" busy ")
            .normalized();

        assert_eq!(draft.name, "Ivan");
        assert_eq!(draft.email, None);
        assert_eq!(draft.skills, vec!["Python"]);
        assert_eq!(draft.status, "busy");
        assert!(draft.validate().is_ok());
    }
}
