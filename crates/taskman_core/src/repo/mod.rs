//! Storage adapters for the task collection.
//!
//! # Responsibility
//! - Define the load/save contract used by the task orchestrator.
//! - Keep file format and write-atomicity details out of service code.
//!
//! # Invariants
//! - `load_tasks` never fails; absent or corrupt stores read as empty.
//! - `save_tasks` overwrites the full collection or leaves the store as it was.

pub mod memory;
pub mod task_repo;
