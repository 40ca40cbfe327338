use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use super::ConfigError;

/// Deployment stage; picks which `{environment}.toml` is layered over the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Environment {
    #[default]
    #[value(alias = "dev")]
    Development,
    Test,
    #[value(alias = "stage")]
    Staging,
    #[value(alias = "prod")]
    Production,
}

impl Environment {
    pub const VAR: &'static str = "PRODUCT_API_APP_ENV";

    /// Reads `PRODUCT_API_APP_ENV`, defaulting to development when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        std::env::var(Self::VAR).map_or(Ok(Self::default()), |raw| raw.parse())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Test => "test",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(raw.trim(), true)
            .map_err(|_| ConfigError::UnknownEnvironment(raw.to_string()))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
