//! Locates and reads `config.toml`.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;
use tracing::{info, warn};

use super::app_config::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, AppConfig};
use crate::infrastructure::storage::write_atomic;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform reports no config directory.
    #[error("no configuration directory for this platform")]
    ConfigDirNotFound,
    /// Reading or writing the config file failed.
    #[error("config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The default config could not be serialized.
    #[error("failed to render default config: {0}")]
    Render(#[from] toml::ser::Error),
}

impl ConfigError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Where the loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// The file was missing and has been written with defaults.
    Created(PathBuf),
    /// The file was read and parsed.
    File(PathBuf),
    /// The file exists but does not parse; defaults are used and the file is
    /// left untouched.
    Malformed(PathBuf),
    /// The platform has no configuration directory.
    BuiltIn,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created(path) => write!(f, "defaults written to {}", path.display()),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Malformed(path) => write!(f, "defaults ({} is malformed)", path.display()),
            Self::BuiltIn => f.write_str("built-in defaults"),
        }
    }
}

/// Reads `config.toml` from the platform config directory or an explicit path.
pub struct ConfigLoader {
    config_dir: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader rooted at the platform config directory, if there is one.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
                .map(|dirs| dirs.config_dir().to_path_buf()),
        }
    }

    /// Loader rooted at `dir`.
    #[must_use]
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: Some(dir.into()),
        }
    }

    /// Path of the file [`load`](Self::load) reads when no override is given.
    #[must_use]
    pub fn default_path(&self) -> Option<PathBuf> {
        self.config_dir
            .as_ref()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Loads the configuration and reports which source won.
    ///
    /// `path_override` wins over the config directory. A missing file is
    /// created with defaults. A malformed file falls back to defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, or the default file cannot be
    /// written.
    pub fn load(
        &self,
        path_override: Option<&Path>,
    ) -> Result<(AppConfig, ConfigSource), ConfigError> {
        let Some(path) = path_override.map(Path::to_path_buf).or_else(|| self.default_path())
        else {
            return Ok((AppConfig::default(), ConfigSource::BuiltIn));
        };

        if !path.exists() {
            let config = AppConfig::default();
            Self::write_default(&path, &config)?;
            info!(path = %path.display(), "Created default config");
            return Ok((config, ConfigSource::Created(path)));
        }

        let content = fs::read_to_string(&path).map_err(|e| ConfigError::io(&path, e))?;
        match toml::from_str::<AppConfig>(&content) {
            Ok(config) => Ok((config, ConfigSource::File(path))),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Malformed config, using defaults");
                Ok((AppConfig::default(), ConfigSource::Malformed(path)))
            }
        }
    }

    fn write_default(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
        let content = toml::to_string_pretty(config)?;
        write_atomic(path, &content).map_err(|e| ConfigError::io(path, e))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
