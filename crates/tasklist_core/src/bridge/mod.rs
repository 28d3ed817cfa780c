//! Presentation bridge between the UI layer and the task repository.
//!
//! # Responsibility
//! - Expose the read/subscribe/edit contract the UI layer calls into.
//! - Hold the single pending edit draft outside the collection.
//!
//! # Invariants
//! - At most one draft exists; opening a new edit replaces it.
//! - Draft changes never touch the repository until `save`.

pub mod edit;
pub mod session;
