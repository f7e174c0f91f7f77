use serde::{Deserialize, Serialize};

use crate::domain::entities::{Credentials, IdentityPayload, Registration};
use crate::domain::serde_utils::string_or_number;

/// Identity object as the backend sends it.
#[derive(Debug, Default, Deserialize)]
pub struct IdentityResponse {
    /// User id, string or integer.
    #[serde(default, deserialize_with = "string_or_number::deserialize_option")]
    pub id: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
    /// Role in whatever casing the backend uses.
    #[serde(default)]
    pub role: Option<String>,
}

/// Identity responses come either bare or wrapped in `{"user": ...}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum IdentityEnvelope {
    /// `{"user": {...}}`.
    Wrapped {
        /// The wrapped identity.
        user: IdentityResponse,
    },
    /// The identity object itself.
    Bare(IdentityResponse),
}

impl From<IdentityEnvelope> for IdentityPayload {
    fn from(envelope: IdentityEnvelope) -> Self {
        let response = match envelope {
            IdentityEnvelope::Wrapped { user } | IdentityEnvelope::Bare(user) => user,
        };
        Self {
            id: response.id,
            name: response.name,
            email: response.email,
            phone: response.phone,
            role: response.role,
        }
    }
}

/// Backend error body.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    #[serde(default)]
    pub message: Option<String>,
    /// Short error code, used when there is no message.
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// Best available description of the failure.
    #[must_use]
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

/// Body of `POST /auth/login`.
#[derive(Serialize)]
pub struct LoginBody<'a> {
    /// Login email.
    pub email: &'a str,
    /// Plain password.
    pub password: &'a str,
}

impl<'a> From<&'a Credentials> for LoginBody<'a> {
    fn from(credentials: &'a Credentials) -> Self {
        Self {
            email: credentials.email(),
            password: credentials.password(),
        }
    }
}

/// Body of `POST /auth/register`.
#[derive(Serialize)]
pub struct RegisterBody<'a> {
    /// Full name.
    pub name: &'a str,
    /// Login email.
    pub email: &'a str,
    /// Contact phone, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    /// Plain password.
    pub password: &'a str,
}

impl<'a> From<&'a Registration> for RegisterBody<'a> {
    fn from(registration: &'a Registration) -> Self {
        Self {
            name: &registration.name,
            email: registration.credentials.email(),
            phone: registration.phone.as_deref(),
            password: registration.credentials.password(),
        }
    }
}
