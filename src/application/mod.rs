//! Application layer with stores, use cases and DTOs.

/// Store wiring for one application load.
pub mod app_state;
/// Data transfer objects.
pub mod dto;
/// Client-side state stores.
pub mod stores;
/// Use case implementations.
pub mod use_cases;

pub use app_state::AppState;
pub use dto::BootstrapOutcome;
pub use stores::{IdentifierSetStore, IdentityStore};
pub use use_cases::{BootstrapSessionUseCase, LoginUseCase};
