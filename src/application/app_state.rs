//! Wiring of the client-side stores for one application load.

use std::sync::Arc;

use crate::application::stores::{IdentifierSetStore, IdentityStore};
use crate::domain::ports::StoragePort;

/// The stores one application load works with.
///
/// All three share one storage medium under disjoint keys.
pub struct AppState {
    /// Favorited property ids.
    pub favorites: IdentifierSetStore,
    /// Property ids queued for side-by-side comparison.
    pub comparison: IdentifierSetStore,
    /// Logged-in identity.
    pub identity: IdentityStore,
}

impl AppState {
    /// Creates the stores over `storage`, or purely in memory when `None`.
    #[must_use]
    pub fn new(storage: Option<Arc<dyn StoragePort>>) -> Self {
        Self {
            favorites: IdentifierSetStore::favorites(storage.clone()),
            comparison: IdentifierSetStore::comparison(storage.clone()),
            identity: IdentityStore::new(storage),
        }
    }

    /// Restores every store from durable storage.
    pub fn hydrate(&mut self) {
        self.favorites.hydrate();
        self.comparison.hydrate();
        self.identity.hydrate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockStorage;

    #[test]
    fn test_in_memory_state_is_hydrated() {
        let state = AppState::new(None);

        assert!(state.favorites.is_hydrated());
        assert!(state.comparison.is_hydrated());
        assert!(state.identity.is_hydrated());
    }

    #[test]
    fn test_stores_share_medium_without_overlap() {
        let storage = Arc::new(MockStorage::new());
        let mut state = AppState::new(Some(storage.clone()));
        state.hydrate();

        state.favorites.add("p1");
        state.comparison.add("p1");
        state.comparison.clear();

        let mut reloaded = AppState::new(Some(storage));
        reloaded.hydrate();
        assert!(reloaded.favorites.effective_contains("p1"));
        assert!(!reloaded.comparison.effective_contains("p1"));
    }
}
