//! Authenticated identity store.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::persisted::Persistence;
use crate::domain::entities::SessionUser;
use crate::domain::ports::StoragePort;

/// Storage key of the identity snapshot.
pub const IDENTITY_KEY: &str = "auth-storage";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentitySnapshot {
    #[serde(default)]
    user: Option<SessionUser>,
    #[serde(default)]
    is_authenticated: bool,
}

/// Holds who is logged in, persisted so a reload keeps the optimistic state.
///
/// `loading` starts `true` and stays in memory only; the session bootstrap
/// clears it once the persisted state has been checked against the backend.
/// Mutations restore the snapshot first when it has not been read yet.
pub struct IdentityStore {
    state: IdentitySnapshot,
    loading: bool,
    hydrated: bool,
    persistence: Persistence,
}

impl IdentityStore {
    /// Creates an anonymous, loading store persisting under [`IDENTITY_KEY`].
    #[must_use]
    pub fn new(storage: Option<Arc<dyn StoragePort>>) -> Self {
        let persistence = Persistence::new(IDENTITY_KEY, storage);
        let hydrated = !persistence.is_durable();

        Self {
            state: IdentitySnapshot::default(),
            loading: true,
            hydrated,
            persistence,
        }
    }

    /// Restores the persisted identity. Runs at most once.
    pub fn hydrate(&mut self) {
        if self.hydrated {
            return;
        }

        if let Some(state) = self.persistence.restore::<IdentitySnapshot>() {
            self.state = state;
        }
        self.hydrated = true;

        debug!(
            is_authenticated = self.state.is_authenticated,
            "Identity store hydrated"
        );
    }

    /// Returns whether the snapshot has been restored.
    #[must_use]
    pub const fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Returns whether someone is (optimistically) logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    /// Logged-in identity, if known.
    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        self.state.user.as_ref()
    }

    /// Returns whether the session is still being verified.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// Records `user` as the logged-in identity.
    pub fn set_user(&mut self, user: SessionUser) {
        self.hydrate();
        info!(user_id = %user.id(), role = %user.role(), "Identity updated");
        self.state.user = Some(user);
        self.state.is_authenticated = true;
        self.persist();
    }

    /// Resets to anonymous and persists it, so reloads stay logged out.
    pub fn logout(&mut self) {
        self.hydrate();
        info!("Identity cleared");
        self.state = IdentitySnapshot::default();
        self.persist();
    }

    /// Sets the in-memory loading flag.
    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// Drops the persisted identity blob altogether.
    pub fn erase_persisted(&mut self) {
        self.persistence.erase();
    }

    fn persist(&self) {
        self.persistence.save(&self.state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;
    use crate::domain::ports::mocks::MockStorage;

    fn ann() -> SessionUser {
        SessionUser::new("u1", "Ann", "a@x.com", Role::Client)
    }

    #[test]
    fn test_starts_anonymous_and_loading() {
        let store = IdentityStore::new(Some(Arc::new(MockStorage::new())));

        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        assert!(store.loading());
        assert!(!store.is_hydrated());
    }

    #[test]
    fn test_set_user_persists() {
        let storage = Arc::new(MockStorage::new());
        let mut store = IdentityStore::new(Some(storage.clone()));
        store.hydrate();

        store.set_user(ann());

        let mut reloaded = IdentityStore::new(Some(storage));
        reloaded.hydrate();
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.user(), Some(&ann()));
    }

    #[test]
    fn test_logout_persists_anonymous_state() {
        let storage = Arc::new(MockStorage::new());
        let mut store = IdentityStore::new(Some(storage.clone()));
        store.hydrate();
        store.set_user(ann());

        store.logout();

        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
        let raw = storage.raw(IDENTITY_KEY).unwrap();
        assert!(raw.contains(r#""isAuthenticated":false"#));

        let mut reloaded = IdentityStore::new(Some(storage));
        reloaded.hydrate();
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn test_loading_is_not_persisted() {
        let storage = Arc::new(MockStorage::new());
        let mut store = IdentityStore::new(Some(storage.clone()));
        store.hydrate();
        store.set_loading(false);
        store.set_user(ann());

        assert!(!storage.raw(IDENTITY_KEY).unwrap().contains("loading"));
        let reloaded = IdentityStore::new(Some(storage));
        assert!(reloaded.loading());
    }

    #[test]
    fn test_erase_persisted_removes_key() {
        let storage = Arc::new(MockStorage::new());
        let mut store = IdentityStore::new(Some(storage.clone()));
        store.hydrate();
        store.set_user(ann());

        store.erase_persisted();

        assert!(storage.raw(IDENTITY_KEY).is_none());
    }

    #[test]
    fn test_set_user_before_hydrate_marks_store_hydrated() {
        let storage = Arc::new(MockStorage::with_entry(
            IDENTITY_KEY,
            r#"{"state":{"user":null,"isAuthenticated":false},"version":0}"#,
        ));
        let mut store = IdentityStore::new(Some(storage.clone()));

        store.set_user(ann());
        store.hydrate();

        assert!(store.is_hydrated());
        assert_eq!(store.user(), Some(&ann()));
        let mut reloaded = IdentityStore::new(Some(storage));
        reloaded.hydrate();
        assert!(reloaded.is_authenticated());
    }

    #[test]
    fn test_restores_flag_without_user() {
        let storage = Arc::new(MockStorage::with_entry(
            IDENTITY_KEY,
            r#"{"state":{"isAuthenticated":true},"version":0}"#,
        ));
        let mut store = IdentityStore::new(Some(storage));

        store.hydrate();

        assert!(store.is_authenticated());
        assert!(store.user().is_none());
    }
}
