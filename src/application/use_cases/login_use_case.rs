//! Login, registration and logout workflows.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::stores::IdentityStore;
use crate::domain::entities::{Credentials, IdentityPayload, Registration, SessionUser};
use crate::domain::errors::AuthError;
use crate::domain::ports::AuthPort;

/// Handles user-initiated authentication.
///
/// Unlike the startup bootstrap, errors here are returned to the caller so a
/// form can show them. The identity store only changes on success and logout.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self { auth_port }
    }

    /// Logs in with email and password.
    ///
    /// # Errors
    /// Returns error if credentials are incomplete, rejected, or the backend
    /// returns an identity without an id.
    pub async fn execute(
        &self,
        credentials: Credentials,
        identity: &mut IdentityStore,
    ) -> Result<SessionUser, AuthError> {
        if !credentials.is_complete() {
            return Err(AuthError::incomplete("email and password are required"));
        }

        debug!(email = %credentials.email(), "Attempting login");

        let payload = self.auth_port.login(&credentials).await.map_err(|e| {
            warn!(error = %e, "Login failed");
            e
        })?;

        Self::accept(payload, identity)
    }

    /// Creates an account and logs into it.
    ///
    /// # Errors
    /// Returns error if the form is incomplete, the backend refuses it, or
    /// the returned identity has no id.
    pub async fn register(
        &self,
        registration: Registration,
        identity: &mut IdentityStore,
    ) -> Result<SessionUser, AuthError> {
        if registration.name.is_empty() || !registration.credentials.is_complete() {
            return Err(AuthError::incomplete("name, email and password are required"));
        }

        debug!(email = %registration.credentials.email(), "Attempting registration");

        let payload = self.auth_port.register(&registration).await.map_err(|e| {
            warn!(error = %e, "Registration failed");
            e
        })?;

        Self::accept(payload, identity)
    }

    /// Ends the session.
    ///
    /// The backend call is best-effort; the local identity is cleared either way.
    pub async fn logout(&self, identity: &mut IdentityStore) {
        if let Err(e) = self.auth_port.logout().await {
            warn!(error = %e, "Backend logout failed, clearing local session anyway");
        }
        identity.logout();
    }

    fn accept(
        payload: IdentityPayload,
        identity: &mut IdentityStore,
    ) -> Result<SessionUser, AuthError> {
        let user = payload.into_session_user().ok_or_else(|| {
            warn!("Backend returned identity without an id");
            AuthError::InvalidIdentity
        })?;

        info!(
            user_id = %user.id(),
            role = %user.role(),
            "Successfully authenticated"
        );

        identity.set_user(user.clone());
        Ok(user)
    }
}
