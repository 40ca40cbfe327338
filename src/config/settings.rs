use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::logger::error_log::DEFAULT_ERROR_LOG_PATH;
use crate::logger::{LogFormat, LogLevel};

/// Everything the service reads at startup. Missing keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerConfig,
    pub logger: LoggerSettings,
    pub error_log: ErrorLogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds a request may take before it is answered with 408
    pub request_timeout: u64,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            request_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerSettings {
    pub level: LogLevel,
    pub console: ConsoleOutput,
    pub file: FileOutput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleOutput {
    pub enabled: bool,
    /// ANSI colours, applied only when stdout is a terminal
    pub colored: bool,
}

impl Default for ConsoleOutput {
    fn default() -> Self {
        Self {
            enabled: true,
            colored: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutput {
    pub enabled: bool,
    pub path: PathBuf,
    /// Keep existing contents instead of truncating on startup
    pub append: bool,
    pub format: LogFormat,
}

impl Default for FileOutput {
    fn default() -> Self {
        Self {
            enabled: false,
            path: PathBuf::from("logs/app.log"),
            append: true,
            format: LogFormat::Full,
        }
    }
}

/// Append-only record of unexpected failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorLogConfig {
    pub enabled: bool,
    pub path: PathBuf,
}

impl Default for ErrorLogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from(DEFAULT_ERROR_LOG_PATH),
        }
    }
}

impl Settings {
    /// Checks the rules serde cannot express, stopping at the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            server,
            logger,
            error_log,
        } = self;

        require(!server.host.trim().is_empty(), "server.host", "must not be blank")?;
        require(server.port != 0, "server.port", "must be between 1 and 65535")?;
        require(
            server.request_timeout > 0,
            "server.request_timeout",
            "must be at least one second",
        )?;
        require(
            logger.console.enabled || logger.file.enabled,
            "logger",
            "needs console or file output enabled",
        )?;
        require(
            !logger.file.enabled || !logger.file.path.as_os_str().is_empty(),
            "logger.file.path",
            "is required when file output is enabled",
        )?;
        require(
            !error_log.enabled || !error_log.path.as_os_str().is_empty(),
            "error_log.path",
            "is required when the error log is enabled",
        )
    }
}

fn require(holds: bool, key: &'static str, reason: &str) -> Result<(), ConfigError> {
    if holds {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, reason))
    }
}
