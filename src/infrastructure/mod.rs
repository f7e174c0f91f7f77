//! Infrastructure layer with external service adapters.

/// Listings backend API client.
pub mod api;
/// Application configuration.
pub mod config;
/// Durable storage adapters.
pub mod storage;

pub use api::{HttpAuthClient, SessionCookieJar};
pub use config::{
    AppConfig, CliArgs, Command, ConfigError, ConfigLoader, ConfigSource, ListCommand, LogLevel,
};
pub use storage::FileStorage;
