//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task list session to Dart via FRB as plain sync calls.
//! - Own the one process-wide session, opened lazily on first use.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Persistence failures never reach Dart; task ops report `false`/empty.

use log::error;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EditDraft, SqliteKeyValueStore, Task, TaskId, TaskListSession,
};

const DB_FILE_NAME: &str = "tasklist.sqlite3";
const DB_PATH_ENV: &str = "TASKLIST_DB_PATH";

static SESSION: OnceLock<Mutex<Option<TaskListSession>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Task row as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub text: String,
    pub checked: bool,
}

/// Pending edit draft as seen by Dart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub id: String,
    pub text: String,
}

impl From<&Task> for TaskItem {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            text: task.text.clone(),
            checked: task.checked,
        }
    }
}

impl From<&EditDraft> for TaskDraft {
    fn from(draft: &EditDraft) -> Self {
        Self {
            id: draft.id.to_string(),
            text: draft.text.clone(),
        }
    }
}

/// Returns all tasks in display order.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list() -> Vec<TaskItem> {
    with_session(|session| session.list().iter().map(TaskItem::from).collect())
        .unwrap_or_default()
}

/// Adds a task. Returns `None` when `text` is blank or the store is unusable.
#[flutter_rust_bridge::frb(sync)]
pub fn task_create(text: String) -> Option<TaskItem> {
    with_session(|session| session.create(text).as_ref().map(TaskItem::from)).flatten()
}

/// Flips the checked flag. Returns whether the task existed.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(id: String) -> bool {
    with_session(|session| session.toggle(&TaskId::from(id))).unwrap_or(false)
}

/// Deletes a task. Returns whether the task existed.
#[flutter_rust_bridge::frb(sync)]
pub fn task_delete(id: String) -> bool {
    with_session(|session| session.delete(&TaskId::from(id))).unwrap_or(false)
}

/// Opens the edit draft for a task. Returns the draft, or `None` if unknown.
#[flutter_rust_bridge::frb(sync)]
pub fn task_open_edit(id: String) -> Option<TaskDraft> {
    with_session(|session| {
        if session.open_edit_by_id(&TaskId::from(id)) {
            session.current_draft().map(TaskDraft::from)
        } else {
            None
        }
    })
    .flatten()
}

/// Replaces the draft text. Returns `false` when no draft is open.
#[flutter_rust_bridge::frb(sync)]
pub fn task_update_draft(text: String) -> bool {
    with_session(|session| session.update_draft_text(text)).unwrap_or(false)
}

/// Saves the open draft into its task. Returns whether a task was updated.
#[flutter_rust_bridge::frb(sync)]
pub fn task_save_edit() -> bool {
    with_session(TaskListSession::save_edit).unwrap_or(false)
}

/// Discards the open draft.
#[flutter_rust_bridge::frb(sync)]
pub fn task_cancel_edit() {
    with_session(TaskListSession::cancel_edit);
}

#[flutter_rust_bridge::frb(sync)]
pub fn task_current_draft() -> Option<TaskDraft> {
    with_session(|session| session.current_draft().map(TaskDraft::from)).flatten()
}

/// Read once per session open, so the path is fixed for a session lifetime.
fn resolve_db_path() -> PathBuf {
    std::env::var(DB_PATH_ENV)
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME))
}

fn open_session() -> Result<TaskListSession, String> {
    let db_path = resolve_db_path();
    let store = SqliteKeyValueStore::open(&db_path)
        .map_err(|err| format!("task store open failed: {err}"))?;
    TaskListSession::open(store).map_err(|err| format!("task session open failed: {err}"))
}

fn lock_slot() -> MutexGuard<'static, Option<TaskListSession>> {
    let slot = SESSION.get_or_init(|| Mutex::new(None));
    // A panic while holding the lock leaves the session usable.
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Runs `f` against the session, opening it on first use.
///
/// Returns `None` when the session cannot be opened; the failure is logged
/// and retried on the next call.
fn with_session<T>(f: impl FnOnce(&mut TaskListSession) -> T) -> Option<T> {
    let mut slot = lock_slot();
    if slot.is_none() {
        match open_session() {
            Ok(session) => *slot = Some(session),
            Err(err) => {
                error!("event=session_open module=ffi status=error error={err}");
                return None;
            }
        }
    }
    slot.as_mut().map(f)
}
