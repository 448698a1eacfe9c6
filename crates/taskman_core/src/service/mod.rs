//! Task use-case services.
//!
//! # Responsibility
//! - Sequence add/view/delete over the presentation boundary, the text
//!   services and the task repository.
//! - Own business-rule decisions and error classification.
//!
//! # Invariants
//! - Nothing is persisted until every preceding step of an operation passed.
//! - Each operation loads and saves the full collection at most once.

pub mod console;
pub mod task_service;
