//! Durable key-value storage port definition.

use crate::domain::errors::StorageError;

/// Port for a string-keyed, string-valued durable store.
///
/// Each persisted store owns exactly one key and keeps its whole state there
/// as a single blob.
pub trait StoragePort: Send + Sync {
    /// Reads the blob stored under `key`.
    ///
    /// # Errors
    /// Returns error if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the blob stored under `key`.
    ///
    /// # Errors
    /// Returns error if the medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Deletes `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    /// Returns error if the medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Mock storage recording every write for testing.
    #[derive(Default)]
    pub struct MockStorage {
        entries: Mutex<HashMap<String, String>>,
        writes: AtomicUsize,
        removals: AtomicUsize,
        fail_writes: AtomicBool,
    }

    impl MockStorage {
        /// Creates empty mock storage.
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates mock storage with one seeded entry.
        pub fn with_entry(key: &str, value: &str) -> Self {
            let storage = Self::new();
            storage
                .entries
                .lock()
                .insert(key.to_string(), value.to_string());
            storage
        }

        /// Makes every subsequent `set` fail.
        pub fn set_fail_writes(&self, value: bool) {
            self.fail_writes.store(value, Ordering::SeqCst);
        }

        pub fn raw(&self, key: &str) -> Option<String> {
            self.entries.lock().get(key).cloned()
        }

        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        pub fn remove_count(&self) -> usize {
            self.removals.load(Ordering::SeqCst)
        }
    }

    impl StoragePort for MockStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.lock().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(StorageError::write(key, "mock write failure"));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.entries
                .lock()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.removals.fetch_add(1, Ordering::SeqCst);
            self.entries.lock().remove(key);
            Ok(())
        }
    }
}
