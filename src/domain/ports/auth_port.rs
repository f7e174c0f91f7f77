//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::{Credentials, IdentityPayload, Registration};
use crate::domain::errors::AuthError;

/// Port for backend session operations.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Asks the backend who the ambient session belongs to.
    async fn current_user(&self) -> Result<IdentityPayload, AuthError>;

    /// Opens a session with email and password.
    async fn login(&self, credentials: &Credentials) -> Result<IdentityPayload, AuthError>;

    /// Creates an account and opens a session for it.
    async fn register(&self, registration: &Registration) -> Result<IdentityPayload, AuthError>;

    /// Closes the backend session.
    async fn logout(&self) -> Result<(), AuthError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Canned backend behavior.
    #[derive(Clone, Debug)]
    pub enum MockReply {
        Identity(IdentityPayload),
        NetworkError,
        Rejected,
        Hang,
    }

    /// Mock authentication port for testing.
    pub struct MockAuthPort {
        reply: Mutex<MockReply>,
        calls: AtomicUsize,
        logouts: AtomicUsize,
    }

    impl MockAuthPort {
        /// Creates new mock.
        pub fn new(reply: MockReply) -> Self {
            Self {
                reply: Mutex::new(reply),
                calls: AtomicUsize::new(0),
                logouts: AtomicUsize::new(0),
            }
        }

        /// Creates mock answering with the given identity.
        pub fn with_identity(payload: IdentityPayload) -> Self {
            Self::new(MockReply::Identity(payload))
        }

        pub fn set_reply(&self, reply: MockReply) {
            *self.reply.lock() = reply;
        }

        /// Number of identity-returning calls made.
        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn logouts(&self) -> usize {
            self.logouts.load(Ordering::SeqCst)
        }

        async fn answer(&self) -> Result<IdentityPayload, AuthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let reply = self.reply.lock().clone();
            match reply {
                MockReply::Identity(payload) => Ok(payload),
                MockReply::NetworkError => Err(AuthError::network("mock connection refused")),
                MockReply::Rejected => Err(AuthError::rejected("mock rejection")),
                MockReply::Hang => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Err(AuthError::network("mock hang ended"))
                }
            }
        }
    }

    #[async_trait]
    impl AuthPort for MockAuthPort {
        async fn current_user(&self) -> Result<IdentityPayload, AuthError> {
            self.answer().await
        }

        async fn login(&self, _credentials: &Credentials) -> Result<IdentityPayload, AuthError> {
            self.answer().await
        }

        async fn register(
            &self,
            _registration: &Registration,
        ) -> Result<IdentityPayload, AuthError> {
            self.answer().await
        }

        async fn logout(&self) -> Result<(), AuthError> {
            self.logouts.fetch_add(1, Ordering::SeqCst);
            let reply = self.reply.lock().clone();
            match reply {
                MockReply::NetworkError => Err(AuthError::network("mock connection refused")),
                _ => Ok(()),
            }
        }
    }
}
