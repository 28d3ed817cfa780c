//! Session facade used by the UI layer.
//!
//! # Responsibility
//! - Own one repository and one edit state for the session lifetime.
//! - Route UI events to repository operations.
//!
//! # Invariants
//! - `cancel_edit` never calls the repository.
//! - `save_edit` merges only the draft text; `checked` is untouched.

use super::edit::{EditDraft, EditState};
use crate::model::task::{Task, TaskId};
use crate::repo::subscription::TaskListSubscription;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoResult;
use crate::store::KeyValueStore;
use log::debug;

/// One task list screen session.
pub struct TaskListSession {
    repo: TaskRepository,
    edit: EditState,
}

impl TaskListSession {
    /// Opens a session over `backend`, loading the stored collection first.
    pub fn open<S: KeyValueStore>(backend: S) -> RepoResult<Self> {
        Ok(Self::new(TaskRepository::open(backend)?))
    }

    pub fn new(repo: TaskRepository) -> Self {
        Self {
            repo,
            edit: EditState::Idle,
        }
    }

    pub fn create(&mut self, text: impl Into<String>) -> Option<Task> {
        self.repo.create(text)
    }

    pub fn toggle(&mut self, id: &TaskId) -> bool {
        self.repo.toggle(id)
    }

    pub fn delete(&mut self, id: &TaskId) -> bool {
        self.repo.delete(id)
    }

    pub fn list(&self) -> &[Task] {
        self.repo.list()
    }

    pub fn subscribe(&mut self) -> TaskListSubscription {
        self.repo.subscribe()
    }

    /// Opens the edit draft for `task`, replacing any open draft.
    pub fn open_edit(&mut self, task: &Task) {
        debug!("event=edit_open module=bridge status=ok task_id={}", task.id);
        self.edit.open(task);
    }

    /// Opens the edit draft for the task with `id`. Returns whether it exists.
    pub fn open_edit_by_id(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.repo.get(id).cloned() else {
            return false;
        };
        self.open_edit(&task);
        true
    }

    /// Replaces the draft text only. Returns `false` when no draft is open.
    pub fn update_draft_text(&mut self, text: impl Into<String>) -> bool {
        self.edit.update_text(text)
    }

    /// Commits the draft to the repository and returns to idle.
    ///
    /// Returns whether a task was updated. A draft whose task was deleted
    /// meanwhile is dropped.
    pub fn save_edit(&mut self) -> bool {
        let Some(EditDraft { id, text }) = self.edit.take() else {
            return false;
        };
        self.repo.save_edit(&id, text)
    }

    /// Discards the draft.
    pub fn cancel_edit(&mut self) {
        if self.edit.take().is_some() {
            debug!("event=edit_cancel module=bridge status=ok");
        }
    }

    pub fn current_draft(&self) -> Option<&EditDraft> {
        self.edit.draft()
    }

    pub fn repository(&self) -> &TaskRepository {
        &self.repo
    }

    /// Blocks until queued writes have been attempted.
    pub fn flush(&self) {
        self.repo.flush();
    }
}
