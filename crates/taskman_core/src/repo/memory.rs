//! In-process task repository.
//!
//! Holds the collection in memory and can be told to reject writes, which
//! lets callers exercise persistence-failure paths without touching disk.

use crate::model::task::Task;
use crate::repo::task_repo::{RepoError, RepoResult, TaskRepository};
use std::cell::{Cell, RefCell};

/// Memory-backed task repository.
#[derive(Debug, Default)]
pub struct MemoryTaskRepository {
    tasks: RefCell<Vec<Task>>,
    fail_writes: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `tasks`.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            ..Self::default()
        }
    }

    /// Makes every later `save_tasks` call fail without changing content.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    /// Snapshot of the currently stored collection.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl TaskRepository for MemoryTaskRepository {
    fn load_tasks(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        if self.fail_writes.get() {
            return Err(RepoError::Unavailable("writes disabled".to_string()));
        }
        *self.tasks.borrow_mut() = tasks.to_vec();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
