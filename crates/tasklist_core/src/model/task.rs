//! Task domain model.
//!
//! # Responsibility
//! - Define the single to-do entry and its identifier.
//! - Provide creation-time validation for user-supplied text.
//!
//! # Invariants
//! - `id` is stable for the task lifetime and never reused after deletion.
//! - `text` is non-blank at creation; later edits are not re-validated.
//! - `checked` starts as `false`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque task identifier.
///
/// Serialized as a plain string. Fresh ids are UUID v4, but any string loaded
/// from storage is accepted so ids written by older builds keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh collision-resistant id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validation errors for task creation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Text is empty or whitespace-only.
    BlankText,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankText => write!(f, "task text must not be blank"),
        }
    }
}

impl Error for TaskValidationError {}

/// A single to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// User-visible label, stored verbatim.
    pub text: String,
    pub checked: bool,
}

impl Task {
    /// Creates an unchecked task with a fresh id.
    ///
    /// # Errors
    /// - Returns `BlankText` when `text` is empty after trimming.
    pub fn new(text: impl Into<String>) -> Result<Self, TaskValidationError> {
        let text = text.into();
        validate_new_text(&text)?;
        Ok(Self::with_id(TaskId::generate(), text))
    }

    /// Creates an unchecked task with a caller-provided id.
    ///
    /// Does not validate `text`; used by import and test paths.
    pub fn with_id(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            checked: false,
        }
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }
}

/// Checks text accepted by task creation.
pub fn validate_new_text(text: &str) -> Result<(), TaskValidationError> {
    if text.trim().is_empty() {
        return Err(TaskValidationError::BlankText);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_new_text, Task, TaskId, TaskValidationError};

    #[test]
    fn new_task_starts_unchecked_with_verbatim_text() {
        let task = Task::new("  buy milk ").expect("non-blank text");
        assert_eq!(task.text, "  buy milk ");
        assert!(!task.checked);
        assert!(!task.id.as_str().is_empty());
    }

    #[test]
    fn blank_text_is_rejected() {
        assert_eq!(Task::new(""), Err(TaskValidationError::BlankText));
        assert_eq!(validate_new_text(" \t\n"), Err(TaskValidationError::BlankText));
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(TaskId::generate(), TaskId::generate());
    }

    #[test]
    fn toggle_flips_checked() {
        let mut task = Task::with_id(TaskId::from("1"), "x");
        task.toggle();
        assert!(task.checked);
        task.toggle();
        assert!(!task.checked);
    }

    #[test]
    fn serializes_to_flat_record() {
        let task = Task::with_id(TaskId::from("1700000000000"), "walk dog");
        let json = serde_json::to_value(&task).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"id": "1700000000000", "text": "walk dog", "checked": false})
        );
    }
}
