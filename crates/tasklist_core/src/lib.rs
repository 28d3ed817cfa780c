//! Core domain logic for the task list screen.
//! This crate is the single source of truth for task invariants.

pub mod bridge;
pub mod logging;
pub mod model;
pub mod repo;
pub mod store;

pub use bridge::edit::{EditDraft, EditState};
pub use bridge::session::TaskListSession;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::subscription::TaskListSubscription;
pub use repo::task_repo::TaskRepository;
pub use repo::{RepoError, RepoResult};
pub use store::memory::MemoryKeyValueStore;
pub use store::sqlite::SqliteKeyValueStore;
pub use store::task_store::{FailureCause, PersistenceError, TaskStore, TASKS_KEY};
pub use store::{KeyValueStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
