//! Persisted favorites and comparison lists.

use std::sync::Arc;

use tracing::{debug, info};

use super::persisted::Persistence;
use crate::domain::entities::IdentifierSet;
use crate::domain::ports::StoragePort;

/// Storage key of the favorites list.
pub const FAVORITES_KEY: &str = "favorites-storage";
/// Storage key of the comparison list.
pub const COMPARISON_KEY: &str = "comparison-storage";

/// Deduplicated set of property ids that survives reloads.
///
/// Every mutation writes the full set to durable storage. Until [`hydrate`]
/// has run, membership queries that drive rendering must go through
/// [`effective_contains`], which reports `false` for everything. A mutation
/// on an unhydrated store restores the snapshot first, so it never writes
/// over saved ids.
///
/// [`hydrate`]: IdentifierSetStore::hydrate
/// [`effective_contains`]: IdentifierSetStore::effective_contains
pub struct IdentifierSetStore {
    ids: IdentifierSet,
    hydrated: bool,
    persistence: Persistence,
}

impl IdentifierSetStore {
    /// Creates a store persisting under `key`.
    ///
    /// With no storage the store lives in memory only and is hydrated at once.
    #[must_use]
    pub fn new(key: impl Into<String>, storage: Option<Arc<dyn StoragePort>>) -> Self {
        let persistence = Persistence::new(key, storage);
        let hydrated = !persistence.is_durable();
        if hydrated {
            debug!(key = %persistence.key(), "No durable storage, store runs in memory");
        }

        Self {
            ids: IdentifierSet::new(),
            hydrated,
            persistence,
        }
    }

    /// Creates the favorites store.
    #[must_use]
    pub fn favorites(storage: Option<Arc<dyn StoragePort>>) -> Self {
        Self::new(FAVORITES_KEY, storage)
    }

    /// Creates the comparison store.
    #[must_use]
    pub fn comparison(storage: Option<Arc<dyn StoragePort>>) -> Self {
        Self::new(COMPARISON_KEY, storage)
    }

    /// Restores the snapshot from durable storage.
    ///
    /// Runs at most once; later calls do nothing. A missing or unreadable
    /// snapshot still completes hydration, leaving the current set in place.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }

        if let Some(ids) = self.persistence.restore::<IdentifierSet>() {
            self.ids = ids;
        }
        self.hydrated = true;

        info!(key = %self.persistence.key(), count = self.ids.len(), "Store hydrated");
    }

    /// Returns whether the snapshot has been restored.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Adds `id` if absent.
    pub fn add(&mut self, id: impl Into<String>) {
        self.hydrate();
        let id = id.into();
        if self.ids.insert(id.as_str()) {
            debug!(key = %self.persistence.key(), id = %id, "Identifier added");
        }
        self.persist();
    }

    /// Removes `id` if present.
    pub fn remove(&mut self, id: &str) {
        self.hydrate();
        if self.ids.remove(id) {
            debug!(key = %self.persistence.key(), id = %id, "Identifier removed");
        }
        self.persist();
    }

    /// Flips membership of `id` and returns whether it is now present.
    pub fn toggle(&mut self, id: &str) -> bool {
        self.hydrate();
        if self.ids.contains(id) {
            self.remove(id);
            false
        } else {
            self.add(id);
            true
        }
    }

    /// Empties the set.
    pub fn clear(&mut self) {
        self.hydrate();
        self.ids.clear();
        debug!(key = %self.persistence.key(), "Store cleared");
        self.persist();
    }

    /// Raw membership, regardless of hydration.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Membership as rendering should see it: `false` until hydrated.
    #[must_use]
    pub fn effective_contains(&self, id: &str) -> bool {
        self.hydrated && self.ids.contains(id)
    }

    /// Identifiers in the order they were added.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        self.ids.as_slice()
    }

    /// Number of identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns whether no identifier is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn persist(&self) {
        self.persistence.save(&self.ids);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockStorage;

    fn durable() -> (Arc<MockStorage>, IdentifierSetStore) {
        let storage = Arc::new(MockStorage::new());
        let store = IdentifierSetStore::favorites(Some(storage.clone()));
        (storage, store)
    }

    #[test]
    fn test_add_and_remove_are_idempotent() {
        let (_, mut store) = durable();
        store.hydrate();

        store.add("p1");
        store.add("p1");
        store.add("p2");
        store.remove("p3");
        store.remove("p2");
        store.remove("p2");

        assert_eq!(store.ids(), ["p1"]);
    }

    #[test]
    fn test_every_mutation_writes_snapshot() {
        let (storage, mut store) = durable();
        store.hydrate();

        store.add("p1");
        store.add("p1");
        store.remove("p1");
        store.clear();

        assert_eq!(storage.write_count(), 4);
        assert_eq!(
            storage.raw(FAVORITES_KEY).as_deref(),
            Some(r#"{"state":[],"version":0}"#)
        );
    }

    #[test]
    fn test_effective_contains_false_before_hydration() {
        let storage = Arc::new(MockStorage::with_entry(
            FAVORITES_KEY,
            r#"{"state":["p1"],"version":0}"#,
        ));
        let mut store = IdentifierSetStore::favorites(Some(storage));

        assert!(!store.is_hydrated());
        assert!(!store.effective_contains("p1"));

        store.hydrate();

        assert!(store.is_hydrated());
        assert!(store.contains("p1"));
        assert!(store.effective_contains("p1"));
    }

    #[test]
    fn test_add_before_hydrate_keeps_saved_ids() {
        let storage = Arc::new(MockStorage::with_entry(
            FAVORITES_KEY,
            r#"{"state":["p1","p2"],"version":0}"#,
        ));
        let mut store = IdentifierSetStore::favorites(Some(storage.clone()));

        store.add("p3");
        store.hydrate();

        assert_eq!(store.ids(), ["p1", "p2", "p3"]);
        assert_eq!(
            storage.raw(FAVORITES_KEY).as_deref(),
            Some(r#"{"state":["p1","p2","p3"],"version":0}"#)
        );
    }

    #[test]
    fn test_remove_before_hydrate_only_drops_that_id() {
        let storage = Arc::new(MockStorage::with_entry(
            COMPARISON_KEY,
            r#"{"state":["p1","p2"],"version":0}"#,
        ));
        let mut store = IdentifierSetStore::comparison(Some(storage.clone()));

        store.remove("p1");

        let mut reloaded = IdentifierSetStore::comparison(Some(storage));
        reloaded.hydrate();
        assert_eq!(reloaded.ids(), ["p2"]);
    }

    #[test]
    fn test_clear_removes_all_members() {
        let (_, mut store) = durable();
        store.hydrate();
        store.add("p1");
        store.add("p2");

        store.clear();

        assert!(!store.contains("p1"));
        assert!(!store.contains("p2"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_without_storage_is_hydrated_immediately() {
        let mut store = IdentifierSetStore::comparison(None);

        assert!(store.is_hydrated());
        store.add("p1");
        assert!(store.effective_contains("p1"));
    }

    #[test]
    fn test_fresh_instance_restores_snapshot() {
        let storage: Arc<MockStorage> = Arc::new(MockStorage::new());
        {
            let mut store = IdentifierSetStore::comparison(Some(storage.clone()));
            store.hydrate();
            store.add("p2");
            store.add("p1");
        }

        let mut reloaded = IdentifierSetStore::comparison(Some(storage));
        reloaded.hydrate();

        assert_eq!(reloaded.ids(), ["p2", "p1"]);
    }

    #[test]
    fn test_stores_use_disjoint_keys() {
        let storage = Arc::new(MockStorage::new());
        let mut favorites = IdentifierSetStore::favorites(Some(storage.clone()));
        let mut comparison = IdentifierSetStore::comparison(Some(storage.clone()));
        favorites.hydrate();
        comparison.hydrate();

        favorites.add("p1");
        comparison.add("p2");

        assert!(storage.raw(FAVORITES_KEY).unwrap().contains("p1"));
        assert!(!storage.raw(FAVORITES_KEY).unwrap().contains("p2"));
        assert!(storage.raw(COMPARISON_KEY).unwrap().contains("p2"));
        assert!(!comparison.contains("p1"));
    }

    #[test]
    fn test_corrupt_snapshot_still_hydrates() {
        let storage = Arc::new(MockStorage::with_entry(FAVORITES_KEY, "garbage"));
        let mut store = IdentifierSetStore::favorites(Some(storage));

        store.hydrate();

        assert!(store.is_hydrated());
        assert!(store.is_empty());
    }

    #[test]
    fn test_hydrate_runs_once() {
        let storage = Arc::new(MockStorage::with_entry(
            FAVORITES_KEY,
            r#"{"state":["p1"],"version":0}"#,
        ));
        let mut store = IdentifierSetStore::favorites(Some(storage));
        store.hydrate();
        store.remove("p1");

        store.hydrate();

        assert!(!store.contains("p1"));
    }

    #[test]
    fn test_toggle_flips_membership() {
        let (_, mut store) = durable();
        store.hydrate();

        assert!(store.toggle("p1"));
        assert!(store.contains("p1"));
        assert!(!store.toggle("p1"));
        assert!(!store.contains("p1"));
    }
}
