//! Task list domain model.
//!
//! # Responsibility
//! - Define the task record shared by repository, store and bridge layers.
//! - Keep the persisted shape and the in-memory shape identical.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Deletion is a hard removal; ids are never reused.

pub mod task;
