//! Listings backend HTTP client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode, header};
use tracing::{debug, warn};

use super::cookies::SessionCookieJar;
use super::dto::{ErrorResponse, IdentityEnvelope, LoginBody, RegisterBody};
use crate::domain::entities::{Credentials, IdentityPayload, Registration};
use crate::domain::errors::AuthError;
use crate::domain::ports::AuthPort;

/// Default backend API root.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";
const USER_AGENT: &str = concat!("homestead/", env!("CARGO_PKG_VERSION"));
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Session endpoints of the listings backend.
///
/// Session cookies set by login are kept in a [`SessionCookieJar`] and sent
/// on later calls, the way a browser would.
pub struct HttpAuthClient {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpAuthClient {
    /// Creates new client with default base URL.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new() -> Result<Self, AuthError> {
        Self::with_base_url(DEFAULT_API_BASE, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Creates client with custom base URL and request timeout.
    ///
    /// Cookies live for this process only.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_base_url(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthError> {
        Self::with_cookie_jar(base_url, timeout, Arc::new(SessionCookieJar::in_memory()))
    }

    /// Creates client that keeps session cookies in `jar`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn with_cookie_jar(
        base_url: impl Into<String>,
        timeout: Duration,
        jar: Arc<SessionCookieJar>,
    ) -> Result<Self, AuthError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .cookie_provider(jar)
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
        })
    }

    /// Sends `token` as a bearer credential on every request.
    #[must_use]
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {token}")),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, AuthError> {
        let response = self.authorize(request).send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach backend");
            if e.is_timeout() {
                AuthError::network("request timed out")
            } else if e.is_connect() {
                AuthError::network("failed to connect to backend")
            } else {
                AuthError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }
        Ok(response)
    }

    async fn identity(&self, request: RequestBuilder) -> Result<IdentityPayload, AuthError> {
        let response = self.send(request).await?;

        let envelope: IdentityEnvelope = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse identity response");
            AuthError::unexpected(format!("failed to parse response: {e}"))
        })?;

        Ok(envelope.into())
    }

    async fn handle_error_response(status: StatusCode, response: Response) -> AuthError {
        let error_message = response
            .json::<ErrorResponse>()
            .await
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AuthError::rejected(error_message),
            StatusCode::TOO_MANY_REQUESTS => AuthError::network("rate limited by backend"),
            s if s.is_server_error() => {
                AuthError::network(format!("backend unavailable: {status} - {error_message}"))
            }
            _ => AuthError::unexpected(format!("unexpected response: {status} - {error_message}")),
        }
    }
}

#[async_trait]
impl AuthPort for HttpAuthClient {
    async fn current_user(&self) -> Result<IdentityPayload, AuthError> {
        debug!("Requesting current identity");
        self.identity(self.client.get(self.url("/auth/me"))).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<IdentityPayload, AuthError> {
        debug!(email = %credentials.email(), "Submitting login");
        let request = self
            .client
            .post(self.url("/auth/login"))
            .json(&LoginBody::from(credentials));
        self.identity(request).await
    }

    async fn register(&self, registration: &Registration) -> Result<IdentityPayload, AuthError> {
        debug!(email = %registration.credentials.email(), "Submitting registration");
        let request = self
            .client
            .post(self.url("/auth/register"))
            .json(&RegisterBody::from(registration));
        self.identity(request).await
    }

    async fn logout(&self) -> Result<(), AuthError> {
        debug!("Closing backend session");
        self.send(self.client.post(self.url("/auth/logout")))
            .await
            .map(|_| ())
    }
}
