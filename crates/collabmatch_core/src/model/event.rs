//! Event domain model.
//!
//! # Invariants
//! - `start_date`/`end_date` are free text and are not validated.
//! - `capacity == 0` means unlimited.

use crate::model::labels::normalize_labels;
use crate::model::validation::{require_labels, require_text, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage-assigned event identifier.
pub type EventId = i64;

/// Persisted event row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    /// Free text, conventionally `YYYY-MM-DD HH:MM`.
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub tags: Vec<String>,
    /// Participant limit, 0 for unlimited.
    pub capacity: u32,
    pub created_at: String,
}

impl Event {
    /// Returns whether the event has no participant limit.
    pub fn is_unlimited(&self) -> bool {
        self.capacity == 0
    }
}

/// Insert draft for a new event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
    pub location: String,
    pub tags: Vec<String>,
    pub capacity: u32,
}

impl NewEvent {
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

    pub fn with_schedule(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = start.into();
        self.end_date = end.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Trims text fields and drops blank tags.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            start_date: self.start_date.trim().to_string(),
            end_date: self.end_date.trim().to_string(),
            location: self.location.trim().to_string(),
            tags: normalize_labels(&self.tags),
            capacity: self.capacity,
        }
    }

    /// Validates the draft before persistence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text(&self.title, ValidationError::BlankTitle)?;
        require_labels(&self.tags, "tags")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NewEvent;
    use crate::model::validation::ValidationError;

    #[test]
    fn validate_requires_title_only() {
        assert_eq!(
            NewEvent::new(" ").validate(),
            Err(ValidationError::BlankTitle)
        );
        // Dates are free text; empty or odd values are accepted.
        let draft = NewEvent::new("Hackathon").with_schedule("soon", "");
        assert!(draft.validate().is_ok());
    }
}
