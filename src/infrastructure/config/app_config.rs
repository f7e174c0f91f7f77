//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::CliArgs;
use crate::infrastructure::api::DEFAULT_API_BASE;

pub(crate) const APP_NAME: &str = "homestead";
pub(crate) const APP_QUALIFIER: &str = "com";
pub(crate) const APP_ORGANIZATION: &str = "homestead";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, from `config.toml` overridden by CLI flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Log file path.
    #[serde(default)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Root URL of the listings backend API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Overall HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Upper bound on the startup session check, in seconds.
    #[serde(default = "default_session_timeout_secs")]
    pub session_timeout_secs: u64,

    /// Bearer token sent with backend requests, for deployments that do not
    /// rely on session cookies.
    #[serde(default)]
    pub auth_token: Option<String>,

    /// Durable storage file path.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Keep favorites, comparison and identity across runs.
    #[serde(default = "default_true")]
    pub persist: bool,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

const fn default_session_timeout_secs() -> u64 {
    5
}

const fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &CliArgs) {
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_base_url) = &args.api_base_url {
            self.api_base_url.clone_from(api_base_url);
        }
        if let Some(session_timeout_secs) = args.session_timeout_secs {
            self.session_timeout_secs = session_timeout_secs;
        }
        if let Some(storage_path) = &args.storage_path {
            self.storage_path = Some(storage_path.clone());
        }
        if args.ephemeral {
            self.persist = false;
        }
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("homestead.log"))
    }

    /// Returns default durable storage path.
    #[must_use]
    pub fn default_storage_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("storage.toml"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective storage path, or `None` when state should not persist.
    #[must_use]
    pub fn effective_storage_path(&self) -> Option<PathBuf> {
        if !self.persist {
            return None;
        }
        self.storage_path.clone().or_else(Self::default_storage_path)
    }

    /// HTTP client timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Bound on the startup session check.
    #[must_use]
    pub const fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_path: None,
            log_level: LogLevel::Info,
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            session_timeout_secs: default_session_timeout_secs(),
            auth_token: None,
            storage_path: None,
            persist: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            api_base_url = "https://listings.example.com/api"
            session_timeout_secs = 3
            log_level = "debug"
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.api_base_url, "https://listings.example.com/api");
        assert_eq!(config.session_timeout(), Duration::from_secs(3));
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.persist);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api_base_url, DEFAULT_API_BASE);
        assert_eq!(config.session_timeout_secs, 5);
        assert!(config.auth_token.is_none());
        assert!(config.persist);
    }

    #[test]
    fn test_cli_overrides_file_values() {
        let mut config = AppConfig::default();
        let args = CliArgs::parse_from([
            "homestead",
            "--api-base-url",
            "http://127.0.0.1:9000",
            "--session-timeout-secs",
            "1",
            "--ephemeral",
            "favorites",
            "list",
        ]);

        config.merge_with_args(&args);

        assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
        assert_eq!(config.session_timeout_secs, 1);
        assert!(!config.persist);
        assert!(config.effective_storage_path().is_none());
    }

    #[test]
    fn test_explicit_storage_path_wins() {
        let config = AppConfig {
            storage_path: Some(PathBuf::from("/tmp/homestead.toml")),
            ..AppConfig::default()
        };

        assert_eq!(
            config.effective_storage_path(),
            Some(PathBuf::from("/tmp/homestead.toml"))
        );
    }
}
