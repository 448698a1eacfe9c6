//! Presentation boundary consumed by the task orchestrator.
//!
//! Implementations prompt and render; they make no business decisions. Input
//! methods return the raw line without its terminator, and an empty string
//! once input is exhausted.

use crate::model::task::Task;
use crate::remote::ServiceWarning;
use std::io;

/// Synchronous prompt/render surface used while an operation runs.
pub trait TaskConsole {
    fn read_title(&mut self) -> io::Result<String>;
    fn read_description(&mut self) -> io::Result<String>;
    fn read_task_number(&mut self) -> io::Result<String>;
    /// Shows the task about to be removed and returns the raw answer.
    fn confirm_delete(&mut self, title: &str) -> io::Result<String>;
    /// Renders the collection with 1-based indices, or an empty state.
    fn show_tasks(&mut self, tasks: &[Task]) -> io::Result<()>;
    /// Surfaces a non-fatal service diagnostic.
    fn show_warning(&mut self, warning: &ServiceWarning) -> io::Result<()>;
}
