use std::path::PathBuf;

use thiserror::Error;

/// Failure to assemble a usable [`Settings`](super::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required configuration file {} not found", .0.display())]
    MissingFile(PathBuf),

    #[error("{dir} and {file} are mutually exclusive; set only one of them")]
    ConflictingSources {
        dir: &'static str,
        file: &'static str,
    },

    #[error("unknown environment `{0}`, expected development, test, staging or production")]
    UnknownEnvironment(String),

    #[error("`{key}` {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            key,
            reason: reason.into(),
        }
    }
}
