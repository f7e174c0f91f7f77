//! Homestead - client-side state for a real-estate listings site.
//!
//! This crate keeps the state a visitor builds up while browsing listings:
//! favorited properties, a comparison list and the logged-in identity. All
//! three survive reloads through a pluggable storage port, and the identity is
//! checked against the backend session once at startup.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing stores, use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the CLI command runner.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "homestead";
