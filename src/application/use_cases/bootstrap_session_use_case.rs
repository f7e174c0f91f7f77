//! Startup session verification.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::application::dto::BootstrapOutcome;
use crate::application::stores::IdentityStore;
use crate::domain::errors::AuthError;
use crate::domain::ports::AuthPort;

/// Default bound on the verification request.
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(5);

/// Reconciles the persisted "logged in" flag with the backend session.
///
/// Consumed by [`execute`](Self::execute), so one instance verifies at most
/// once per application load.
pub struct BootstrapSessionUseCase {
    auth_port: Arc<dyn AuthPort>,
    timeout: Duration,
}

impl BootstrapSessionUseCase {
    /// Creates new use case with the default timeout.
    #[must_use]
    pub fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self {
            auth_port,
            timeout: DEFAULT_SESSION_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Verifies the persisted session and updates `identity` accordingly.
    ///
    /// Never fails: every error path ends logged out. `loading` is cleared on
    /// every path before returning.
    pub async fn execute(self, identity: &mut IdentityStore) -> BootstrapOutcome {
        identity.hydrate();

        let outcome = if identity.is_authenticated() {
            self.verify(identity).await
        } else {
            debug!("No persisted session, skipping verification");
            BootstrapOutcome::Anonymous
        };

        identity.set_loading(false);
        outcome
    }

    async fn verify(&self, identity: &mut IdentityStore) -> BootstrapOutcome {
        debug!(timeout_ms = self.timeout_ms(), "Verifying persisted session");

        let response = match tokio::time::timeout(self.timeout, self.auth_port.current_user()).await
        {
            Ok(result) => result,
            Err(_) => Err(AuthError::Timeout {
                timeout_ms: self.timeout_ms(),
            }),
        };

        match response {
            Ok(payload) => {
                if let Some(user) = payload.into_session_user() {
                    info!(user_id = %user.id(), role = %user.role(), "Session verified");
                    identity.set_user(user.clone());
                    BootstrapOutcome::Verified(user)
                } else {
                    warn!("Session check returned no identifier, logging out");
                    identity.logout();
                    BootstrapOutcome::InvalidIdentity
                }
            }
            Err(e) => {
                warn!(error = %e, "Session verification failed, logging out");
                identity.logout();
                identity.erase_persisted();
                BootstrapOutcome::VerificationFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}
