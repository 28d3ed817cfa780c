//! In-memory task repository.
//!
//! # Responsibility
//! - Provide create/toggle/delete/edit/list over the session collection.
//! - Schedule one full-collection write per toggle/delete/edit call and per
//!   accepted create, whether or not the id matched.
//! - Notify subscribers with a fresh snapshot after each state change.
//!
//! # Invariants
//! - The collection is loaded before the repository accepts any mutation.
//! - Operations on unknown ids leave the collection unchanged, never error,
//!   and still rewrite the stored collection.
//! - Blank text is rejected on create only; edits are stored verbatim.

use super::persist::PersistenceWorker;
use super::subscription::{Subscriber, TaskListSubscription};
use super::RepoResult;
use crate::model::task::{validate_new_text, Task, TaskId};
use crate::store::task_store::TaskStore;
use crate::store::KeyValueStore;
use log::{debug, info};

/// Canonical owner of the task collection for one session.
///
/// Dropping the repository waits for queued writes to finish.
pub struct TaskRepository {
    tasks: Vec<Task>,
    revision: u64,
    subscribers: Vec<Subscriber>,
    writer: PersistenceWorker,
}

impl TaskRepository {
    /// Loads the stored collection from `backend` and starts the session.
    ///
    /// Loading completes before this returns, so no mutation can race it.
    /// A corrupt or unreadable stored value starts an empty session.
    ///
    /// # Errors
    /// - `WorkerSpawn` when the persistence thread cannot be started.
    pub fn open<S: KeyValueStore>(backend: S) -> RepoResult<Self> {
        let store = TaskStore::new(backend);
        let tasks = store.load();
        let writer = PersistenceWorker::spawn(store)?;

        info!("event=repo_open module=repo status=ok count={}", tasks.len());
        Ok(Self {
            tasks,
            revision: 0,
            subscribers: Vec::new(),
            writer,
        })
    }

    /// Appends a new unchecked task.
    ///
    /// Returns `None` without touching state when `text` is blank.
    pub fn create(&mut self, text: impl Into<String>) -> Option<Task> {
        let text = text.into();
        if validate_new_text(&text).is_err() {
            debug!("event=task_create module=repo status=rejected reason=blank_text");
            return None;
        }

        let task = Task::with_id(self.fresh_id(), text);
        self.tasks.push(task.clone());
        info!("event=task_create module=repo status=ok task_id={}", task.id);
        self.commit();
        Some(task)
    }

    /// Flips `checked` on the matching task. Returns whether a task matched.
    pub fn toggle(&mut self, id: &TaskId) -> bool {
        let Some(task) = self.find_mut(id) else {
            debug!("event=task_toggle module=repo status=noop task_id={id}");
            self.persist();
            return false;
        };
        task.toggle();
        info!(
            "event=task_toggle module=repo status=ok task_id={id} checked={}",
            task.checked
        );
        self.commit();
        true
    }

    /// Removes the matching task. Returns whether a task was removed.
    pub fn delete(&mut self, id: &TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|task| &task.id == id) else {
            debug!("event=task_delete module=repo status=noop task_id={id}");
            self.persist();
            return false;
        };
        self.tasks.remove(index);
        info!("event=task_delete module=repo status=ok task_id={id}");
        self.commit();
        true
    }

    /// Replaces the text of the matching task verbatim.
    ///
    /// `checked` and `id` are untouched. Empty text is accepted.
    pub fn save_edit(&mut self, id: &TaskId, new_text: impl Into<String>) -> bool {
        let Some(task) = self.find_mut(id) else {
            debug!("event=task_edit module=repo status=noop task_id={id}");
            self.persist();
            return false;
        };
        task.text = new_text.into();
        info!("event=task_edit module=repo status=ok task_id={id}");
        self.commit();
        true
    }

    /// Current collection in display order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Owned copy of the current collection.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of successful mutations this session.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns a subscription that holds the newest snapshot after each
    /// state change.
    pub fn subscribe(&mut self) -> TaskListSubscription {
        let (subscriber, subscription) = Subscriber::pair();
        self.subscribers.push(subscriber);
        subscription
    }

    /// Blocks until all writes scheduled so far have been attempted.
    pub fn flush(&self) {
        self.writer.flush();
    }

    fn find_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| &task.id == id)
    }

    fn fresh_id(&self) -> TaskId {
        loop {
            let id = TaskId::generate();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self) {
        self.revision += 1;
        self.persist();
        let snapshot = &self.tasks;
        self.subscribers.retain(|subscriber| subscriber.publish(snapshot));
    }

    fn persist(&self) {
        self.writer.schedule(self.tasks.clone());
    }
}
