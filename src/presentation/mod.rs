//! Presentation layer: CLI command execution.

/// CLI command runner.
pub mod commands;

pub use commands::CommandRunner;
