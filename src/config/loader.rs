use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};

use super::{ConfigError, Environment, Settings};

/// Directory holding `default.toml` and its overlays.
pub const CONFIG_DIR_VAR: &str = "PRODUCT_API_CONFIG_DIR";
/// A single TOML file used instead of the layered directory.
pub const CONFIG_FILE_VAR: &str = "PRODUCT_API_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";
const ENV_PREFIX: &str = "PRODUCT_API";

/// Where the TOML part of the settings is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `default.toml` (required), `{environment}.toml` and `local.toml`
    Layered(PathBuf),
    /// Exactly this file, which must exist
    Single(PathBuf),
}

/// Merges the TOML files for one environment with `PRODUCT_API_*` overrides.
#[derive(Debug)]
pub struct ConfigLoader {
    source: ConfigSource,
    environment: Environment,
}

impl ConfigLoader {
    /// Starts from `PRODUCT_API_CONFIG_DIR` or `PRODUCT_API_CONFIG_FILE` (never
    /// both) and `PRODUCT_API_APP_ENV`.
    pub fn new() -> Result<Self, ConfigError> {
        let source = match (
            std::env::var_os(CONFIG_DIR_VAR),
            std::env::var_os(CONFIG_FILE_VAR),
        ) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::ConflictingSources {
                    dir: CONFIG_DIR_VAR,
                    file: CONFIG_FILE_VAR,
                });
            }
            (_, Some(file)) => ConfigSource::Single(file.into()),
            (dir, None) => ConfigSource::Layered(
                dir.map_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR), PathBuf::from),
            ),
        };

        Ok(Self {
            source,
            environment: Environment::from_env()?,
        })
    }

    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = ConfigSource::Single(path.into());
        self
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder();
        for (path, required) in self.files() {
            if required && !path.is_file() {
                return Err(ConfigError::MissingFile(path));
            }
            builder = builder.add_source(File::new(utf8(&path)?, FileFormat::Toml).required(required));
        }

        let settings: Settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Files to merge, lowest precedence first, each with whether it must exist.
    fn files(&self) -> Vec<(PathBuf, bool)> {
        match &self.source {
            ConfigSource::Single(file) => vec![(file.clone(), true)],
            ConfigSource::Layered(dir) => vec![
                (dir.join("default.toml"), true),
                (dir.join(format!("{}.toml", self.environment)), false),
                (dir.join("local.toml"), false),
            ],
        }
    }
}

fn utf8(path: &Path) -> Result<&str, ConfigError> {
    path.to_str().ok_or_else(|| {
        ConfigError::invalid("config_file", format!("{} is not valid UTF-8", path.display()))
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::ffi::{OsStr, OsString};
    use std::sync::{Mutex, MutexGuard};
    use tempfile::TempDir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Exclusive access to the process environment. Starts with every
    /// variable the loader reads unset and restores them all on drop.
    pub(crate) struct ScopedEnv {
        saved: Vec<(&'static str, Option<OsString>)>,
        _lock: MutexGuard<'static, ()>,
    }

    impl ScopedEnv {
        pub(crate) fn clean() -> Self {
            let mut env = Self {
                saved: Vec::new(),
                _lock: ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner()),
            };
            for key in [
                CONFIG_DIR_VAR,
                CONFIG_FILE_VAR,
                Environment::VAR,
                "PRODUCT_API_SERVER__PORT",
                "PRODUCT_API_ERROR_LOG__PATH",
            ] {
                env.save(key);
                unsafe { std::env::remove_var(key) };
            }
            env
        }

        pub(crate) fn set(&mut self, key: &'static str, value: impl AsRef<OsStr>) {
            self.save(key);
            unsafe { std::env::set_var(key, value) };
        }

        fn save(&mut self, key: &'static str) {
            self.saved.push((key, std::env::var_os(key)));
        }
    }

    impl Drop for ScopedEnv {
        fn drop(&mut self) {
            for (key, value) in self.saved.drain(..).rev() {
                match value {
                    Some(value) => unsafe { std::env::set_var(key, value) },
                    None => unsafe { std::env::remove_var(key) },
                }
            }
        }
    }

    pub(crate) fn config_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, contents) in files {
            std::fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    #[test]
    fn test_defaults_to_layered_config_directory() {
        let _env = ScopedEnv::clean();

        let loader = ConfigLoader::new().unwrap();
        assert_eq!(loader.source(), &ConfigSource::Layered(PathBuf::from("config")));
        assert_eq!(loader.environment(), Environment::Development);
    }

    #[test]
    fn test_dir_and_file_variables_conflict() {
        let mut env = ScopedEnv::clean();
        env.set(CONFIG_DIR_VAR, "/etc/product-api");
        env.set(CONFIG_FILE_VAR, "/etc/product-api.toml");

        assert!(matches!(
            ConfigLoader::new(),
            Err(ConfigError::ConflictingSources { .. })
        ));
    }

    #[test]
    fn test_unknown_app_env_is_an_error() {
        let mut env = ScopedEnv::clean();
        env.set(Environment::VAR, "qa");

        assert!(matches!(
            ConfigLoader::new(),
            Err(ConfigError::UnknownEnvironment(_))
        ));
    }

    #[test]
    fn test_missing_default_toml() {
        let mut env = ScopedEnv::clean();
        let dir = config_dir(&[]);
        env.set(CONFIG_DIR_VAR, dir.path());

        match ConfigLoader::new().unwrap().load() {
            Err(ConfigError::MissingFile(path)) => assert!(path.ends_with("default.toml")),
            other => panic!("expected a missing default.toml, got {other:?}"),
        }
    }

    #[test]
    fn test_layers_apply_in_precedence_order() {
        let mut env = ScopedEnv::clean();
        let dir = config_dir(&[
            ("default.toml", "[server]\nhost = \"10.0.0.1\"\nport = 3000\n"),
            ("production.toml", "[server]\nhost = \"10.0.0.2\"\nport = 3001\n"),
            ("local.toml", "[server]\nport = 3002\n"),
        ]);
        env.set(CONFIG_DIR_VAR, dir.path());
        env.set(Environment::VAR, "prod");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.host, "10.0.0.2");
        assert_eq!(settings.server.port, 3002);

        env.set("PRODUCT_API_SERVER__PORT", "3003");
        env.set("PRODUCT_API_ERROR_LOG__PATH", "var/errors.txt");
        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.port, 3003);
        assert_eq!(settings.error_log.path, PathBuf::from("var/errors.txt"));
    }

    #[test]
    fn test_with_environment_overrides_app_env() {
        let mut env = ScopedEnv::clean();
        let dir = config_dir(&[
            ("default.toml", ""),
            ("staging.toml", "[server]\nport = 7070\n"),
        ]);
        env.set(CONFIG_DIR_VAR, dir.path());
        env.set(Environment::VAR, "production");

        let settings = ConfigLoader::new()
            .unwrap()
            .with_environment(Environment::Staging)
            .load()
            .unwrap();
        assert_eq!(settings.server.port, 7070);
    }

    #[test]
    fn test_single_file_skips_the_directory_layers() {
        let mut env = ScopedEnv::clean();
        let dir = config_dir(&[
            ("default.toml", "[server]\nport = 1111\n"),
            ("only.toml", "[server]\nport = 2222\n"),
        ]);
        env.set(CONFIG_DIR_VAR, dir.path());

        let settings = ConfigLoader::new()
            .unwrap()
            .with_config_file(dir.path().join("only.toml"))
            .load()
            .unwrap();
        assert_eq!(settings.server.port, 2222);
    }

    #[test]
    fn test_config_file_variable_selects_single_file() {
        let mut env = ScopedEnv::clean();
        let dir = config_dir(&[("service.toml", "[error_log]\nenabled = false\n")]);
        env.set(CONFIG_FILE_VAR, dir.path().join("service.toml"));

        let loader = ConfigLoader::new().unwrap();
        assert!(matches!(loader.source(), ConfigSource::Single(_)));
        assert!(!loader.load().unwrap().error_log.enabled);
    }

    #[test]
    fn test_bad_values_are_rejected() {
        let mut env = ScopedEnv::clean();
        let dir = config_dir(&[("default.toml", "[logger]\nlevel = \"chatty\"\n")]);
        env.set(CONFIG_DIR_VAR, dir.path());
        assert!(matches!(
            ConfigLoader::new().unwrap().load(),
            Err(ConfigError::Source(_))
        ));

        std::fs::write(dir.path().join("default.toml"), "[server]\nport = 0\n").unwrap();
        assert!(matches!(
            ConfigLoader::new().unwrap().load(),
            Err(ConfigError::Invalid { key: "server.port", .. })
        ));
    }
}
