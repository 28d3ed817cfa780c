//! Task repository and its persistence worker.
//!
//! # Responsibility
//! - Own the canonical in-memory task collection for one session.
//! - Hand a full snapshot to the durable store after every mutation call.
//!
//! # Invariants
//! - Insertion order is display order; delete never reorders survivors.
//! - No two tasks share an id.
//! - Mutations never wait on a write; writes land in mutation order.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod persist;
pub mod subscription;
pub mod task_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors raised while constructing a repository.
///
/// Mutations themselves never fail; persistence problems are logged.
#[derive(Debug)]
pub enum RepoError {
    /// The background persistence thread could not be started.
    WorkerSpawn(std::io::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WorkerSpawn(err) => write!(f, "failed to start persistence worker: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WorkerSpawn(err) => Some(err),
        }
    }
}
