//! Command-line entry: argument parsing and the settings overrides it implies.

mod parser;
pub mod dry_run;

pub use parser::{Cli, Command, ServeArgs};

use anyhow::Context;

use crate::config::{ConfigLoader, Environment, Settings};
use crate::logger::LogLevel;

impl Cli {
    /// `--env` if given, otherwise `PRODUCT_API_APP_ENV`.
    pub fn environment(&self) -> anyhow::Result<Environment> {
        match self.env {
            Some(environment) => Ok(environment),
            None => Ok(Environment::from_env()?),
        }
    }

    /// Loads the configured settings, applies the flags on top and validates the result.
    pub fn load_settings(&self, environment: Environment) -> anyhow::Result<Settings> {
        let mut loader = ConfigLoader::new()?.with_environment(environment);
        if let Some(path) = &self.config {
            loader = loader.with_config_file(path);
        }

        let mut settings = loader.load().context("Failed to load configuration")?;
        self.apply_overrides(&mut settings);
        settings
            .validate()
            .context("Invalid configuration after command-line overrides")?;
        Ok(settings)
    }

    pub fn apply_overrides(&self, settings: &mut Settings) {
        if self.verbose {
            settings.logger.level = LogLevel::Debug;
        } else if self.quiet {
            settings.logger.level = LogLevel::Error;
        }

        let Some(serve) = self.serve_args() else {
            return;
        };
        if let Some(host) = &serve.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = serve.port {
            settings.server.port = port;
        }
        if let Some(level) = serve.log_level {
            settings.logger.level = level;
        }
    }
}
