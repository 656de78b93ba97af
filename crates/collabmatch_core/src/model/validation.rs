//! Draft validation errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reasons for insert drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// User display name is empty after trim.
    BlankName,
    /// Event or project title is empty after trim.
    BlankTitle,
    /// A skill, interest or tag entry is empty after trim.
    BlankLabel { field: &'static str },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "name must not be blank"),
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::BlankLabel { field } => write!(f, "{field} must not contain blank entries"),
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require_text(value: &str, err: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(err);
    }
    Ok(())
}

pub(crate) fn require_labels(
    labels: &[String],
    field: &'static str,
) -> Result<(), ValidationError> {
    if labels.iter().any(|label| label.trim().is_empty()) {
        return Err(ValidationError::BlankLabel { field });
    }
    Ok(())
}
