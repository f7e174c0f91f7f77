//! Session DTOs.

use crate::domain::entities::SessionUser;

/// How the startup session check ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Nothing persisted claimed a session; no request was made.
    Anonymous,
    /// Backend confirmed the session.
    Verified(SessionUser),
    /// Backend answered without a usable id. Local identity was cleared,
    /// the persisted blob was rewritten but not erased.
    InvalidIdentity,
    /// Request failed or timed out. Local identity was cleared and the
    /// persisted blob erased.
    VerificationFailed {
        /// Why verification failed.
        reason: String,
    },
}

impl BootstrapOutcome {
    /// Returns whether a network request was issued.
    #[must_use]
    pub const fn contacted_backend(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    /// Returns whether the persisted identity key was erased.
    #[must_use]
    pub const fn erased_storage(&self) -> bool {
        matches!(self, Self::VerificationFailed { .. })
    }

    /// Returns the verified user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Verified(user) => Some(user),
            _ => None,
        }
    }
}

impl std::fmt::Display for BootstrapOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Anonymous => write!(f, "anonymous"),
            Self::Verified(user) => write!(f, "verified as {} ({})", user.email(), user.role()),
            Self::InvalidIdentity => write!(f, "invalid identity, logged out"),
            Self::VerificationFailed { reason } => {
                write!(f, "verification failed ({reason}), logged out")
            }
        }
    }
}
