//! Durable key-value storage for the task collection.
//!
//! # Responsibility
//! - Define the key-value contract the task store persists through.
//! - Provide SQLite (device) and in-memory (tests, previews) backends.
//! - Encode/decode the whole task collection under one fixed key.
//!
//! # Invariants
//! - A write replaces the whole prior value for its key.
//! - Store failures are returned as values; callers decide whether to log.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;
pub mod task_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Backend failure from a key-value store.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// The store file was written by a newer schema than this build knows.
    UnsupportedSchemaVersion { stored: u32, latest: u32 },
    /// A shared in-memory map was poisoned by a panicking writer.
    Poisoned,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion { stored, latest } => write!(
                f,
                "store schema version {stored} is newer than supported {latest}"
            ),
            Self::Poisoned => write!(f, "key-value store lock poisoned"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Poisoned => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Local string key-value medium surviving across sessions.
///
/// Implementations must be movable to the persistence worker thread.
pub trait KeyValueStore: Send + 'static {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;
}
