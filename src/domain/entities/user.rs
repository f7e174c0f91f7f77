//! Authenticated user identity.

use serde::{Deserialize, Serialize};

/// Canonical permission level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Back-office administrator.
    Admin,
    /// Regular site visitor with an account.
    #[default]
    Client,
}

impl Role {
    /// Normalizes a backend role spelling.
    ///
    /// Only `"ADMIN"` and `"admin"` map to [`Role::Admin`]; every other value,
    /// including a missing one, maps to [`Role::Client`].
    #[must_use]
    pub fn from_backend(raw: Option<&str>) -> Self {
        match raw {
            Some("ADMIN" | "admin") => Self::Admin,
            _ => Self::Client,
        }
    }

    /// Canonical lowercase spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity recognized by the backend session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    role: Role,
}

impl SessionUser {
    /// Creates a user without a phone number.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: None,
            role,
        }
    }

    /// Sets the contact phone.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Backend identifier, never blank.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name, empty when the backend sent none.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Contact email, empty when the backend sent none.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Contact phone, if known.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Normalized role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }
}

/// Raw identity as returned by the backend, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityPayload {
    /// Backend identifier, if any.
    pub id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Role exactly as the backend spelled it.
    pub role: Option<String>,
}

impl IdentityPayload {
    /// Validates the payload into a [`SessionUser`].
    ///
    /// Returns `None` when the identifier is missing or blank.
    #[must_use]
    pub fn into_session_user(self) -> Option<SessionUser> {
        let id = self.id.filter(|id| !id.trim().is_empty())?;
        let role = Role::from_backend(self.role.as_deref());

        Some(SessionUser {
            id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone,
            role,
        })
    }
}
