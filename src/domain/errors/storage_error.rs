//! Durable storage error types.

use thiserror::Error;

/// Durable storage error variants.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read key {key}: {message}")]
    ReadFailed { key: String, message: String },

    #[error("failed to write key {key}: {message}")]
    WriteFailed { key: String, message: String },

    #[error("failed to remove key {key}: {message}")]
    RemoveFailed { key: String, message: String },

    #[error("failed to (de)serialize snapshot for {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("durable storage not available: {0}")]
    NotAvailable(String),
}

impl StorageError {
    /// Creates read failure error.
    #[must_use]
    pub fn read(key: impl Into<String>, message: impl ToString) -> Self {
        Self::ReadFailed {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Creates write failure error.
    #[must_use]
    pub fn write(key: impl Into<String>, message: impl ToString) -> Self {
        Self::WriteFailed {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Creates remove failure error.
    #[must_use]
    pub fn remove(key: impl Into<String>, message: impl ToString) -> Self {
        Self::RemoveFailed {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Creates serialization error.
    #[must_use]
    pub fn serialization(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            key: key.into(),
            source,
        }
    }
}
