//! Authentication error types.

use thiserror::Error;

/// Authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("credentials rejected by backend: {message}")]
    Rejected { message: String },

    #[error("incomplete credentials: {reason}")]
    IncompleteCredentials { reason: String },

    #[error("backend returned an identity without an id")]
    InvalidIdentity,

    #[error("network error during authentication: {message}")]
    NetworkError { message: String },

    #[error("session verification timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates rejected error.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Creates incomplete credentials error.
    #[must_use]
    pub fn incomplete(reason: impl Into<String>) -> Self {
        Self::IncompleteCredentials {
            reason: reason.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns whether error came from the transport rather than the backend's answer.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}
