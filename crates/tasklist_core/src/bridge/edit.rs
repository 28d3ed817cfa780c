//! Edit-draft state machine.

use crate::model::task::{Task, TaskId};

/// Transient copy of a task's id and text while the user composes an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: TaskId,
    pub text: String,
}

/// `Idle` until an edit is opened; back to `Idle` on save or cancel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing(EditDraft),
}

impl EditState {
    /// Starts editing `task`, replacing any open draft.
    pub fn open(&mut self, task: &Task) {
        *self = Self::Editing(EditDraft {
            id: task.id.clone(),
            text: task.text.clone(),
        });
    }

    /// Replaces the draft text. Returns `false` when idle.
    pub fn update_text(&mut self, text: impl Into<String>) -> bool {
        match self {
            Self::Editing(draft) => {
                draft.text = text.into();
                true
            }
            Self::Idle => false,
        }
    }

    /// Leaves editing and hands back the draft, if any.
    pub fn take(&mut self) -> Option<EditDraft> {
        match std::mem::take(self) {
            Self::Editing(draft) => Some(draft),
            Self::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        match self {
            Self::Editing(draft) => Some(draft),
            Self::Idle => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }
}
