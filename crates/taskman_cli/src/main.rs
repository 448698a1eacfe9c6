//! `taskman`: interactive command-line task manager.

mod app;
mod console;

use clap::Parser;
use console::TerminalConsole;
use log::info;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use taskman_core::{build_task_service, AppConfig, ConfigError};

/// Add, view and delete tasks; text is checked and tidied by optional
/// validator and formatter services.
#[derive(Parser, Debug)]
#[command(name = "taskman")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/taskman/config.toml when present)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Task store location
    #[arg(short = 'f', long)]
    pub tasks_file: Option<PathBuf>,

    /// Validator service address (ip:port)
    #[arg(long)]
    pub validator: Option<String>,

    /// Formatter service address (ip:port)
    #[arg(long)]
    pub formatter: Option<String>,

    /// Per-call service round-trip timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Log level: trace|debug|info|warn|error|off
    #[arg(long)]
    pub log_level: Option<String>,

    /// Absolute directory for log files
    #[arg(long)]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    fn resolve_config(&self) -> Result<AppConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::load_default()?,
        };
        if let Some(tasks_file) = &self.tasks_file {
            config.tasks_file = tasks_file.clone();
        }
        if let Some(address) = &self.validator {
            config.validator.address = address.clone();
        }
        if let Some(address) = &self.formatter {
            config.formatter.address = address.clone();
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        config.validate()?;
        Ok(config)
    }

    fn start_logging(&self) {
        let level = self
            .log_level
            .as_deref()
            .unwrap_or_else(|| taskman_core::default_log_level());
        let Some(log_dir) = self.log_dir.clone().or_else(taskman_core::default_log_dir) else {
            eprintln!("warning: no log directory available; logging disabled");
            return;
        };
        if let Err(err) = taskman_core::init_logging(level, &log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli.start_logging();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    info!(
        "event=cli_start module=cli status=ok version={} tasks_file={} validator={} formatter={} timeout_ms={}",
        taskman_core::core_version(),
        config.tasks_file.display(),
        config.validator.address,
        config.formatter.address,
        config.timeout_ms
    );

    let service = build_task_service(&config);
    let mut console = TerminalConsole::new(io::stdin().lock(), io::stdout().lock());
    match app::run(&mut console, &service) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: terminal i/o failed: {err}");
            ExitCode::FAILURE
        }
    }
}
