//! Task orchestration service.
//!
//! # Responsibility
//! - Add: validate and format title and description, then append and save.
//! - View: load and render the collection.
//! - Delete: guard, pick by 1-based index, confirm, remove and save.
//!
//! # Invariants
//! - A rejected title stops the add flow before the description prompt.
//! - Service faults never fail an operation; they surface as warnings.
//! - Delete never removes anything without an exact `yes` (any case).
//! - Save failures are reported once and not retried.

use crate::config::TaskLimits;
use crate::model::task::{FormatType, Task, TaskValidationError};
use crate::remote::{ResilientTextService, ServiceOutcome, TextService};
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::service::console::TaskConsole;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;

/// Minimum title length sent to the validator.
pub const TITLE_MIN_LENGTH: usize = 1;
/// Minimum description length sent to the validator.
pub const DESCRIPTION_MIN_LENGTH: usize = 0;
/// Confirmation token accepted by delete, compared case-insensitively.
pub const AFFIRMATIVE_TOKEN: &str = "yes";

/// Successful end state of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Added(Task),
    Listed { count: usize },
    Deleted(Task),
    /// The user declined the confirmation; nothing changed.
    DeletionCancelled(Task),
}

/// Operation-level failure. None of these are fatal to the process.
#[derive(Debug)]
pub enum TaskError {
    /// The validator rejected the title; carries its message verbatim.
    InvalidTitle(String),
    /// The validator rejected the description; carries its message verbatim.
    InvalidDescription(String),
    /// The assembled record broke a model invariant.
    Record(TaskValidationError),
    SaveFailed(RepoError),
    NoTasks,
    InvalidTaskNumber(String),
    DeleteFailed(RepoError),
    Console(io::Error),
}

impl Display for TaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(message) | Self::InvalidDescription(message) => {
                write!(f, "{message}")
            }
            Self::Record(err) => write!(f, "{err}"),
            Self::SaveFailed(_) => write!(f, "Failed to save task"),
            Self::NoTasks => write!(f, "No tasks available to delete"),
            Self::InvalidTaskNumber(_) => write!(f, "Invalid task number"),
            Self::DeleteFailed(_) => write!(f, "Failed to delete task"),
            Self::Console(err) => write!(f, "console i/o failed: {err}"),
        }
    }
}

impl Error for TaskError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Record(err) => Some(err),
            Self::SaveFailed(err) | Self::DeleteFailed(err) => Some(err),
            Self::Console(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for TaskError {
    fn from(value: TaskValidationError) -> Self {
        Self::Record(value)
    }
}

impl From<io::Error> for TaskError {
    fn from(value: io::Error) -> Self {
        Self::Console(value)
    }
}

pub type TaskResult<T> = Result<T, TaskError>;

/// Orchestrates task use-cases over a repository and a text service.
pub struct TaskService<R: TaskRepository, S: TextService> {
    repo: R,
    text: ResilientTextService<S>,
    limits: TaskLimits,
}

impl<R: TaskRepository, S: TextService> TaskService<R, S> {
    pub fn new(repo: R, text_service: S, limits: TaskLimits) -> Self {
        Self {
            repo,
            text: ResilientTextService::new(text_service),
            limits,
        }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// The primary (non-fallback) text service.
    pub fn text_service(&self) -> &S {
        self.text.primary()
    }

    /// Collects, validates and formats a new task, then appends it.
    pub fn add_task<C: TaskConsole>(&self, console: &mut C) -> TaskResult<TaskOutcome> {
        let title = console.read_title()?;
        let checked = self
            .text
            .validate(&title, TITLE_MIN_LENGTH, self.limits.title_max);
        let checked_locally = checked.warning.is_some();
        let verdict = relay(console, checked)?;
        if !verdict.valid {
            if checked_locally && title.trim().is_empty() {
                return Err(TaskValidationError::EmptyTitle.into());
            }
            return Err(TaskError::InvalidTitle(rejection_message(
                verdict.error,
                "Task title was rejected by the validator",
            )));
        }
        if title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle.into());
        }
        let title = relay(console, self.text.format(&title, FormatType::Title))?;

        let description = console.read_description()?;
        let verdict = relay(
            console,
            self.text.validate(
                &description,
                DESCRIPTION_MIN_LENGTH,
                self.limits.description_max,
            ),
        )?;
        if !verdict.valid {
            return Err(TaskError::InvalidDescription(rejection_message(
                verdict.error,
                "Task description was rejected by the validator",
            )));
        }
        let description = relay(
            console,
            self.text.format(&description, FormatType::Sentence),
        )?;

        let task = Task::new(title, description)?;
        let mut tasks = self.repo.load_tasks();
        tasks.push(task.clone());
        self.repo.save_tasks(&tasks).map_err(TaskError::SaveFailed)?;

        info!(
            "event=task_add module=service status=ok count={}",
            tasks.len()
        );
        Ok(TaskOutcome::Added(task))
    }

    /// Renders every stored task in order.
    pub fn view_tasks<C: TaskConsole>(&self, console: &mut C) -> TaskResult<TaskOutcome> {
        let tasks = self.repo.load_tasks();
        console.show_tasks(&tasks)?;
        Ok(TaskOutcome::Listed { count: tasks.len() })
    }

    /// Removes one task chosen by its 1-based display index.
    pub fn delete_task<C: TaskConsole>(&self, console: &mut C) -> TaskResult<TaskOutcome> {
        let mut tasks = self.repo.load_tasks();
        if tasks.is_empty() {
            return Err(TaskError::NoTasks);
        }
        console.show_tasks(&tasks)?;

        let raw = console.read_task_number()?;
        let index = parse_task_number(&raw, tasks.len())?;

        let answer = console.confirm_delete(&tasks[index].title)?;
        if !is_affirmative(&answer) {
            info!("event=task_delete module=service status=cancelled index={}", index + 1);
            return Ok(TaskOutcome::DeletionCancelled(tasks[index].clone()));
        }

        let removed = tasks.remove(index);
        self.repo
            .save_tasks(&tasks)
            .map_err(TaskError::DeleteFailed)?;

        info!(
            "event=task_delete module=service status=ok index={} remaining={}",
            index + 1,
            tasks.len()
        );
        Ok(TaskOutcome::Deleted(removed))
    }
}

/// Forwards a fallback warning to the console and unwraps the value.
fn relay<C: TaskConsole, T>(console: &mut C, outcome: ServiceOutcome<T>) -> io::Result<T> {
    if let Some(warning) = &outcome.warning {
        console.show_warning(warning)?;
    }
    Ok(outcome.value)
}

/// The validator's own message, reported as-is when it sent one.
fn rejection_message(error: Option<String>, default: &str) -> String {
    error
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses a 1-based task number and returns the matching 0-based index.
pub fn parse_task_number(raw: &str, len: usize) -> TaskResult<usize> {
    let trimmed = raw.trim();
    let number: i64 = trimmed.parse().map_err(|_| {
        warn!("event=task_delete module=service status=rejected reason=not_a_number");
        TaskError::InvalidTaskNumber(trimmed.to_string())
    })?;
    match usize::try_from(number) {
        Ok(number) if (1..=len).contains(&number) => Ok(number - 1),
        _ => {
            warn!(
                "event=task_delete module=service status=rejected reason=out_of_range number={number} len={len}"
            );
            Err(TaskError::InvalidTaskNumber(trimmed.to_string()))
        }
    }
}

/// Only the exact token (ignoring ASCII case) confirms a deletion.
pub fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case(AFFIRMATIVE_TOKEN)
}
