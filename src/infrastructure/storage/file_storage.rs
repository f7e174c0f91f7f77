//! File-backed durable storage.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::atomic::write_atomic;
use crate::domain::errors::StorageError;
use crate::domain::ports::StoragePort;

/// Keeps every key in one TOML table on disk.
///
/// Entries are cached in memory and the whole file is rewritten atomically on
/// each change, so a crash never leaves a half-written file behind.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Opens storage at `path`, creating parent directories as needed.
    ///
    /// A missing file starts empty. An unparsable file is logged and treated
    /// as empty; it is overwritten on the next write.
    ///
    /// # Errors
    /// Returns error if the directory cannot be created or the file cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::NotAvailable(e.to_string()))?;
        }

        let entries = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| StorageError::read(path.display().to_string(), e))?;
            match toml::from_str::<BTreeMap<String, String>>(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to parse storage file, starting empty"
                    );
                    BTreeMap::new()
                }
            }
        } else {
            BTreeMap::new()
        };

        info!(path = %path.display(), keys = entries.len(), "Durable storage opened");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, key: &str, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content = toml::to_string_pretty(entries).map_err(|e| StorageError::write(key, e))?;
        write_atomic(&self.path, &content).map_err(|e| StorageError::write(key, e))?;

        debug!(key, "Storage flushed");
        Ok(())
    }
}

impl StoragePort for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.flush(key, &entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(key, &entries)
            .map_err(|e| StorageError::remove(key, e))
    }
}
