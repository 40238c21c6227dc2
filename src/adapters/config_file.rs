//! JSON file + environment configuration adapter.
//!
//! Implements [`ConfigPort`] in three layers, later ones winning:
//!
//! 1. [`ControllerConfig::default()`]
//! 2. the JSON file named by `FANCTL_CONFIG`, if set (fields it omits keep
//!    their defaults)
//! 3. individual `FANCTL_*` variables
//!
//! The result is validated before it is returned.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::ControllerConfig;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV: &str = "FANCTL_CONFIG";

type EnvLookup = fn(&str) -> Option<String>;

pub struct JsonConfigAdapter<F = EnvLookup> {
    path: Option<PathBuf>,
    lookup: F,
}

impl JsonConfigAdapter {
    /// File from `FANCTL_CONFIG`, overrides from the process environment.
    pub fn from_env() -> Self {
        Self {
            path: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            lookup: process_env,
        }
    }
}

impl<F> JsonConfigAdapter<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn new(path: Option<PathBuf>, lookup: F) -> Self {
        Self { path, lookup }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl<F> ConfigPort for JsonConfigAdapter<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn load(&self) -> Result<ControllerConfig, ConfigError> {
        let mut config = match &self.path {
            Some(path) => read_file(path)?,
            None => ControllerConfig::default(),
        };
        config.apply_overrides(&self.lookup)?;
        config.validate()?;
        Ok(config)
    }
}

fn read_file(path: &Path) -> Result<ControllerConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_owned(),
        source,
    })?;
    let config = serde_json::from_str(&text).map_err(|source| ConfigError::Malformed {
        path: path.to_owned(),
        source,
    })?;
    debug!("config: loaded {}", path.display());
    Ok(config)
}

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
