//! Domain layer with core entities and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Serde utilities.
pub mod serde_utils;

pub use entities::{IdentifierSet, Role, SessionUser};
pub use errors::{AuthError, StorageError};
pub use ports::{AuthPort, StoragePort};
