//! Task domain model.
//!
//! # Responsibility
//! - Define the `{title, description}` record and its JSON shape.
//! - Enforce the non-blank title rule before a record can be built.
//!
//! # Invariants
//! - `title` is never blank for a task built through `Task::new`.
//! - `description` may be empty.
//! - Serialized field names are exactly `title` and `description`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One stored task.
///
/// Tasks are kept in creation order; the display index (1-based) is the only
/// handle callers use to address a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub title: String,
    /// Older stores may omit the key; it is read back as empty.
    #[serde(default)]
    pub description: String,
}

impl Task {
    /// Builds a task, rejecting a blank title.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            title: title.into(),
            description: description.into(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Validates record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Record-level validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Task title cannot be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// Formatting style requested from the formatter service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatType {
    /// First letter upper-cased, rest untouched.
    Sentence,
    Upper,
    Lower,
    /// Every word capitalized.
    Title,
}

impl FormatType {
    /// Wire value sent as `format_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sentence => "sentence",
            Self::Upper => "upper",
            Self::Lower => "lower",
            Self::Title => "title",
        }
    }
}

impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
