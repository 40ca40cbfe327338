//! Layered settings: `config/default.toml`, then `config/{environment}.toml`,
//! then `config/local.toml`, then `PRODUCT_API_*` variables
//! (`PRODUCT_API_SERVER__PORT=8080` sets `server.port`).

mod environment;
mod error;
mod loader;
mod settings;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::{CONFIG_DIR_VAR, CONFIG_FILE_VAR, ConfigLoader, ConfigSource};
pub use settings::{ConsoleOutput, ErrorLogConfig, FileOutput, LoggerSettings, ServerConfig, Settings};

#[cfg(test)]
pub(crate) use loader::tests::{ScopedEnv, config_dir};
