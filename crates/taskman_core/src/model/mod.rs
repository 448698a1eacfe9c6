//! Domain model for stored tasks.
//!
//! # Responsibility
//! - Define the task record persisted by the storage adapter.
//! - Define text formatting styles understood by the formatter service.
//!
//! # Invariants
//! - A task has no identity beyond its 1-based position in the collection.
//! - A stored title is never empty or whitespace-only.

pub mod task;
