//! Process-wide configuration.
//!
//! # Responsibility
//! - Describe the task store location, service endpoints, the round-trip
//!   timeout and text length limits.
//! - Load them from an optional TOML file with per-key defaults.
//!
//! # Invariants
//! - Every key is optional; an absent default file means default config.
//! - A loaded config always passes `validate()`.
//! - Service addresses are literal socket addresses, never host names.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_TASKS_FILE: &str = "tasks.json";
pub const DEFAULT_VALIDATOR_ADDRESS: &str = "127.0.0.1:5555";
pub const DEFAULT_FORMATTER_ADDRESS: &str = "127.0.0.1:5556";
pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;
pub const DEFAULT_TITLE_MAX: usize = 100;
pub const DEFAULT_DESCRIPTION_MAX: usize = 500;

const CONFIG_DIR_NAME: &str = "taskman";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Network location of one text service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEndpoint {
    /// Literal `ip:port` socket address.
    pub address: String,
}

impl ServiceEndpoint {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// Maximum accepted lengths for task text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskLimits {
    pub title_max: usize,
    pub description_max: usize,
}

impl Default for TaskLimits {
    fn default() -> Self {
        Self {
            title_max: DEFAULT_TITLE_MAX,
            description_max: DEFAULT_DESCRIPTION_MAX,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tasks_file: PathBuf,
    pub timeout_ms: u64,
    pub validator: ServiceEndpoint,
    pub formatter: ServiceEndpoint,
    pub limits: TaskLimits,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tasks_file: PathBuf::from(DEFAULT_TASKS_FILE),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            validator: ServiceEndpoint::new(DEFAULT_VALIDATOR_ADDRESS),
            formatter: ServiceEndpoint::new(DEFAULT_FORMATTER_ADDRESS),
            limits: TaskLimits::default(),
        }
    }
}

impl AppConfig {
    /// `<config_dir>/taskman/config.toml`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the default config file if it exists, otherwise defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                debug!(
                    "event=config_load module=config status=missing path={}",
                    path.display()
                );
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Loads an explicit config file. A missing file is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&raw).map_err(|err| err.at(path))?;
        info!(
            "event=config_load module=config status=ok path={}",
            path.display()
        );
        Ok(config)
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: None,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be positive".into()));
        }
        check_endpoint("validator", &self.validator)?;
        check_endpoint("formatter", &self.formatter)?;
        if self.limits.title_max == 0 {
            return Err(ConfigError::Invalid("limits.title_max must be positive".into()));
        }
        if self.tasks_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("tasks_file is empty".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Endpoints must be literal `ip:port` pairs; resolving a host name would block
/// outside the per-call deadline.
fn check_endpoint(name: &str, endpoint: &ServiceEndpoint) -> Result<(), ConfigError> {
    endpoint
        .address
        .trim()
        .parse::<SocketAddr>()
        .map(|_| ())
        .map_err(|_| {
            ConfigError::Invalid(format!(
                "{name}.address must be an ip:port socket address, got `{}`",
                endpoint.address
            ))
        })
}

/// Config loading failures.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        source: toml::de::Error,
    },
    Invalid(String),
}

impl ConfigError {
    fn at(self, path: &Path) -> Self {
        match self {
            Self::Parse { source, .. } => Self::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        }
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config `{}`: {source}", path.display())
            }
            Self::Parse {
                path: Some(path),
                source,
            } => write!(f, "invalid config `{}`: {source}", path.display()),
            Self::Parse { path: None, source } => write!(f, "invalid config: {source}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, DEFAULT_FORMATTER_ADDRESS, DEFAULT_VALIDATOR_ADDRESS};
    use std::path::{Path, PathBuf};
    use std::time::Duration;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml_str("").expect("empty config parses");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.timeout(), Duration::from_millis(2_000));
        assert_eq!(config.validator.address, DEFAULT_VALIDATOR_ADDRESS);
        assert_eq!(config.formatter.address, DEFAULT_FORMATTER_ADDRESS);
        assert_eq!(config.limits.title_max, 100);
        assert_eq!(config.limits.description_max, 500);
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = AppConfig::from_toml_str(
            r#"
            tasks_file = "/tmp/my-tasks.json"
            timeout_ms = 250

            [formatter]
            address = "10.0.0.7:7000"

            [limits]
            description_max = 80
            "#,
        )
        .expect("partial config parses");
        assert_eq!(config.tasks_file, PathBuf::from("/tmp/my-tasks.json"));
        assert_eq!(config.timeout_ms, 250);
        assert_eq!(config.validator.address, DEFAULT_VALIDATOR_ADDRESS);
        assert_eq!(config.formatter.address, "10.0.0.7:7000");
        assert_eq!(config.limits.title_max, 100);
        assert_eq!(config.limits.description_max, 80);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = AppConfig::from_toml_str("timeout_ms = 0").expect_err("zero timeout");
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn endpoints_must_be_socket_addresses() {
        for address in ["", "localhost:5555", "validator.internal:80", "127.0.0.1"] {
            let raw = format!("[validator]\naddress = \"{address}\"\n");
            let err = AppConfig::from_toml_str(&raw).expect_err("not a socket address");
            assert!(matches!(err, ConfigError::Invalid(_)), "address={address:?}");
        }
        let config = AppConfig::from_toml_str("[formatter]\naddress = \"[::1]:5556\"\n")
            .expect("ipv6 literal");
        assert_eq!(config.formatter.address, "[::1]:5556");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml_str("timeout_ms = \"soon\"").expect_err("bad type");
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_missing_file_is_an_io_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here/taskman.toml"))
            .expect_err("missing explicit config");
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("taskman.toml"));
    }
}
