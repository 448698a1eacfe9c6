//! Task repository contract and JSON file implementation.
//!
//! # Responsibility
//! - Persist the ordered task collection as a pretty-printed JSON array.
//! - Recover from missing or structurally invalid stores with an empty list.
//!
//! # Invariants
//! - Writes go to a sibling temp file that is renamed over the store, so a
//!   failed save never leaves a partially written file behind.
//! - Element order on disk is display order.

use crate::model::task::Task;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage failure for task persistence.
#[derive(Debug)]
pub enum RepoError {
    Io(io::Error),
    Serialize(serde_json::Error),
    /// Injected by in-process adapters to simulate a failing store.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "task store i/o error: {err}"),
            Self::Serialize(err) => write!(f, "task store encode error: {err}"),
            Self::Unavailable(message) => write!(f, "task store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<io::Error> for RepoError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

impl From<tempfile::PersistError> for RepoError {
    fn from(value: tempfile::PersistError) -> Self {
        Self::Io(value.error)
    }
}

/// Repository interface for the ordered task collection.
pub trait TaskRepository {
    /// Loads the full collection; returns an empty list when nothing usable
    /// is stored.
    fn load_tasks(&self) -> Vec<Task>;
    /// Replaces the stored collection with `tasks`.
    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for &R {
    fn load_tasks(&self) -> Vec<Task> {
        (**self).load_tasks()
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        (**self).save_tasks(tasks)
    }
}

/// JSON-file-backed task repository.
#[derive(Debug, Clone)]
pub struct JsonFileTaskRepository {
    path: PathBuf,
}

impl JsonFileTaskRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_load(&self) -> RepoResult<Option<Vec<Task>>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_atomically(&self, tasks: &[Task]) -> RepoResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut staged = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut staged, tasks)?;
        staged.write_all(b"\n")?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path)?;
        Ok(())
    }
}

impl TaskRepository for JsonFileTaskRepository {
    fn load_tasks(&self) -> Vec<Task> {
        match self.try_load() {
            Ok(Some(tasks)) => {
                info!(
                    "event=tasks_load module=repo status=ok count={} path={}",
                    tasks.len(),
                    self.path.display()
                );
                tasks
            }
            Ok(None) => {
                info!(
                    "event=tasks_load module=repo status=missing path={}",
                    self.path.display()
                );
                Vec::new()
            }
            Err(err) => {
                warn!(
                    "event=tasks_load module=repo status=recovered path={} error={}",
                    self.path.display(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn save_tasks(&self, tasks: &[Task]) -> RepoResult<()> {
        let started_at = Instant::now();
        match self.write_atomically(tasks) {
            Ok(()) => {
                info!(
                    "event=tasks_save module=repo status=ok count={} duration_ms={} path={}",
                    tasks.len(),
                    started_at.elapsed().as_millis(),
                    self.path.display()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=tasks_save module=repo status=error duration_ms={} path={} error={}",
                    started_at.elapsed().as_millis(),
                    self.path.display(),
                    err
                );
                Err(err)
            }
        }
    }
}
