//! Snapshot persistence shared by the client-side stores.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::errors::StorageError;
use crate::domain::ports::StoragePort;

/// Snapshot format version. Blobs carrying another version are ignored.
pub const SNAPSHOT_VERSION: u32 = 0;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

/// Writes and restores one store's snapshot under its own key.
///
/// Without a storage medium every operation is a no-op. Failures are logged
/// and never surface to the owning store.
pub struct Persistence {
    key: String,
    storage: Option<Arc<dyn StoragePort>>,
}

impl Persistence {
    /// Creates persistence for `key`; `None` keeps everything in memory.
    #[must_use]
    pub fn new(key: impl Into<String>, storage: Option<Arc<dyn StoragePort>>) -> Self {
        Self {
            key: key.into(),
            storage,
        }
    }

    /// Storage key owned by this store.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns whether a durable medium backs this store.
    #[must_use]
    pub fn is_durable(&self) -> bool {
        self.storage.is_some()
    }

    /// Reads the snapshot, if a valid one exists.
    pub fn restore<T: DeserializeOwned>(&self) -> Option<T> {
        let storage = self.storage.as_ref()?;

        let raw = match storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No snapshot stored");
                return None;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read snapshot");
                return None;
            }
        };

        match serde_json::from_str::<Envelope<T>>(&raw) {
            Ok(envelope) if envelope.version == SNAPSHOT_VERSION => {
                debug!(key = %self.key, "Snapshot restored");
                Some(envelope.state)
            }
            Ok(envelope) => {
                warn!(
                    key = %self.key,
                    version = envelope.version,
                    "Ignoring snapshot with unknown version"
                );
                None
            }
            Err(e) => {
                let e = StorageError::serialization(self.key.clone(), e);
                warn!(error = %e, "Ignoring corrupt snapshot");
                None
            }
        }
    }

    /// Writes the whole state as one blob.
    pub fn save<T: Serialize>(&self, state: &T) {
        let Some(storage) = &self.storage else {
            return;
        };

        let envelope = EnvelopeRef {
            state,
            version: SNAPSHOT_VERSION,
        };
        let blob = match serde_json::to_string(&envelope) {
            Ok(blob) => blob,
            Err(e) => {
                let e = StorageError::serialization(self.key.clone(), e);
                warn!(error = %e, "Failed to serialize snapshot");
                return;
            }
        };

        if let Err(e) = storage.set(&self.key, &blob) {
            warn!(key = %self.key, error = %e, "Failed to persist snapshot");
        }
    }

    /// Deletes the stored blob entirely.
    pub fn erase(&self) {
        let Some(storage) = &self.storage else {
            return;
        };

        match storage.remove(&self.key) {
            Ok(()) => debug!(key = %self.key, "Snapshot erased"),
            Err(e) => warn!(key = %self.key, error = %e, "Failed to erase snapshot"),
        }
    }
}
