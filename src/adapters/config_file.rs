//! JSON file configuration adapter.
//!
//! Implements [`ConfigPort`] by reading an [`IndicatorConfig`] from a JSON
//! file. Fields missing from the file are an error, not a default; the
//! whole config is validated before it is handed out.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::IndicatorConfig;
use crate::error::Result;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "ENTRANCE_INDICATOR_CONFIG";

pub struct JsonConfigFile {
    path: PathBuf,
}

impl JsonConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Adapter for the path in [`CONFIG_PATH_ENV`], if set.
    pub fn from_env() -> Option<Self> {
        std::env::var_os(CONFIG_PATH_ENV).map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Boot-time config lookup.
///
/// No file configured, or a configured file that does not exist, yields
/// the defaults. A file that exists but cannot be read, parsed or
/// validated is an [`Error::Config`](crate::error::Error::Config).
pub fn load_config(file: Option<&JsonConfigFile>) -> Result<IndicatorConfig> {
    let Some(file) = file else {
        info!("config: {} not set, using defaults", CONFIG_PATH_ENV);
        return Ok(IndicatorConfig::default());
    };
    match file.load() {
        Ok(config) => Ok(config),
        Err(ConfigError::NotFound) => {
            warn!("config: {} not found, using defaults", file.path().display());
            Ok(IndicatorConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

impl ConfigPort for JsonConfigFile {
    fn load(&self) -> core::result::Result<IndicatorConfig, ConfigError> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound,
            _ => ConfigError::IoError,
        })?;
        let config: IndicatorConfig =
            serde_json::from_str(&text).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        info!("config: loaded {}", self.path.display());
        Ok(config)
    }
}
