//! Core logic for the taskman command-line task manager.
//! Storage, the resilient text-service client and task orchestration live
//! here; terminal I/O lives in the CLI crate.

pub mod config;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError, ServiceEndpoint, TaskLimits};
pub use logging::{default_log_dir, default_log_level, init_logging, logging_status};
pub use model::task::{FormatType, Task, TaskValidationError};
pub use remote::{
    LocalTextService, RemoteTextService, ResilientTextService, ServiceError, ServiceKind,
    ServiceOutcome, ServiceResult, ServiceWarning, TextService, ValidationVerdict,
};
pub use repo::memory::MemoryTaskRepository;
pub use repo::task_repo::{JsonFileTaskRepository, RepoError, RepoResult, TaskRepository};
pub use service::console::TaskConsole;
pub use service::task_service::{TaskError, TaskOutcome, TaskResult, TaskService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Builds the production service stack from configuration.
pub fn build_task_service(
    config: &AppConfig,
) -> TaskService<JsonFileTaskRepository, RemoteTextService> {
    let repo = JsonFileTaskRepository::new(config.tasks_file.clone());
    let text = RemoteTextService::new(
        config.validator.address.clone(),
        config.formatter.address.clone(),
        config.timeout(),
    );
    TaskService::new(repo, text, config.limits)
}
