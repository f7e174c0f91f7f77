//! Client-side state stores.

mod identifier_set_store;
mod identity_store;
mod persisted;

pub use identifier_set_store::{COMPARISON_KEY, FAVORITES_KEY, IdentifierSetStore};
pub use identity_store::{IDENTITY_KEY, IdentityStore};
pub use persisted::{Persistence, SNAPSHOT_VERSION};
