use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use std::path::Path;
use thiserror::Error;

use super::settings::Settings;

/// Project settings file, relative to the working directory
pub const CONFIG_FILE: &str = ".envstack/config.yaml";

/// Untracked overrides for [`CONFIG_FILE`]
pub const LOCAL_CONFIG_FILE: &str = ".envstack/local.yaml";

/// Prefix for environment overrides, e.g. `ENVSTACK_LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "ENVSTACK_";

/// Settings error types
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log_dir: {0} exists and is not a directory")]
    InvalidLogDir(String),
}

/// Settings loader with hierarchical merging
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings relative to the working directory
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .envstack/config.yaml
    /// 3. .envstack/local.yaml
    /// 4. Environment variables (ENVSTACK_* prefix, `__` for nesting)
    pub fn load() -> Result<Settings> {
        Self::load_from(Path::new("."))
    }

    /// Load settings with the YAML files resolved against `root`
    pub fn load_from(root: impl AsRef<Path>) -> Result<Settings> {
        let root = root.as_ref();
        let settings: Settings = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Yaml::file(root.join(CONFIG_FILE)))
            .merge(Yaml::file(root.join(LOCAL_CONFIG_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("Failed to extract settings from figment")?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Load settings from a single file on top of the defaults
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Settings> {
        let settings: Settings = Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load settings from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&settings)?;
        Ok(settings)
    }

    /// Validate settings after loading
    pub fn validate(settings: &Settings) -> Result<(), SettingsError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        let level = settings.logging.level.to_lowercase();
        if !valid_log_levels.contains(&level.as_str()) {
            return Err(SettingsError::InvalidLogLevel(
                settings.logging.level.clone(),
            ));
        }

        if let Some(ref dir) = settings.logging.log_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(SettingsError::InvalidLogDir(dir.display().to_string()));
            }
        }

        Ok(())
    }
}
