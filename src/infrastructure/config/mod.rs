//! Application configuration.

pub mod app_config;
pub mod args;
pub mod loader;

pub use app_config::{AppConfig, LogLevel};
pub use args::{CliArgs, Command, ListCommand};
pub use loader::{ConfigError, ConfigLoader, ConfigSource};
