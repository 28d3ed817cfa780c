//! Task collection persistence over a key-value store.
//!
//! # Responsibility
//! - Serialize the whole collection as a JSON array under `TASKS_KEY`.
//! - Degrade unreadable or malformed stored values to an empty collection.
//!
//! # Invariants
//! - No partial writes, no versioning, no migration of the stored value.
//! - `load()` never fails; `save()` reports failure but never retries.
//! - Loaded collections never contain two tasks with the same id.

use super::{KeyValueStore, StoreError};
use crate::model::task::Task;
use log::{debug, error, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key holding the serialized task collection.
pub const TASKS_KEY: &str = "tasks";

/// Underlying reason for a persistence failure.
#[derive(Debug)]
pub enum FailureCause {
    Store(StoreError),
    Format(serde_json::Error),
}

impl Display for FailureCause {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Format(err) => write!(f, "{err}"),
        }
    }
}

/// Non-fatal persistence failures.
#[derive(Debug)]
pub enum PersistenceError {
    /// Stored value missing a valid shape or backend read rejected.
    ReadFailure(FailureCause),
    /// Backend unavailable or write rejected.
    WriteFailure(FailureCause),
}

impl PersistenceError {
    fn cause(&self) -> &FailureCause {
        match self {
            Self::ReadFailure(cause) | Self::WriteFailure(cause) => cause,
        }
    }
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFailure(cause) => write!(f, "failed to read task collection: {cause}"),
            Self::WriteFailure(cause) => write!(f, "failed to write task collection: {cause}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self.cause() {
            FailureCause::Store(err) => Some(err),
            FailureCause::Format(err) => Some(err),
        }
    }
}

/// Durable store adapter for the task collection.
pub struct TaskStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Loads the saved collection, or an empty one.
    ///
    /// Read and parse failures are logged as `PersistenceReadFailure` and
    /// never surfaced.
    pub fn load(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(tasks) => {
                debug!("event=store_load module=store status=ok count={}", tasks.len());
                tasks
            }
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error error_code=persistence_read_failure error={err}"
                );
                Vec::new()
            }
        }
    }

    /// Loads the saved collection, reporting why it could not be read.
    ///
    /// Returns an empty collection when nothing was ever saved.
    pub fn try_load(&self) -> Result<Vec<Task>, PersistenceError> {
        let raw = self
            .backend
            .get_item(TASKS_KEY)
            .map_err(|err| PersistenceError::ReadFailure(FailureCause::Store(err)))?;
        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = serde_json::from_str(&raw)
            .map_err(|err| PersistenceError::ReadFailure(FailureCause::Format(err)))?;
        Ok(dedup_by_id(tasks))
    }

    /// Replaces the stored collection with `tasks`.
    ///
    /// # Errors
    /// - `WriteFailure` when encoding or the backend write fails. The failure
    ///   is also logged here so fire-and-forget callers can drop it.
    pub fn save(&self, tasks: &[Task]) -> Result<(), PersistenceError> {
        let result = serde_json::to_string(tasks)
            .map_err(|err| PersistenceError::WriteFailure(FailureCause::Format(err)))
            .and_then(|payload| {
                self.backend
                    .set_item(TASKS_KEY, &payload)
                    .map_err(|err| PersistenceError::WriteFailure(FailureCause::Store(err)))
            });

        match &result {
            Ok(()) => debug!("event=store_save module=store status=ok count={}", tasks.len()),
            Err(err) => error!(
                "event=store_save module=store status=error error_code=persistence_write_failure count={} error={err}",
                tasks.len()
            ),
        }
        result
    }
}

fn dedup_by_id(tasks: Vec<Task>) -> Vec<Task> {
    let mut seen = HashSet::with_capacity(tasks.len());
    let total = tasks.len();
    let unique = tasks
        .into_iter()
        .filter(|task| seen.insert(task.id.clone()))
        .collect::<Vec<_>>();
    if unique.len() != total {
        warn!(
            "event=store_load module=store status=repaired dropped_duplicates={}",
            total - unique.len()
        );
    }
    unique
}
