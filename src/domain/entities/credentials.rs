//! Login and registration credentials.

use std::fmt;

use zeroize::Zeroizing;

/// Email and password submitted through the login form.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Builds credentials; the email is trimmed.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// Login email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Plain password, zeroed on drop.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns whether both fields carry something to send.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// New account details submitted through the registration form.
#[derive(Clone, Debug)]
pub struct Registration {
    /// Full name.
    pub name: String,
    /// Contact phone, optional on the form.
    pub phone: Option<String>,
    /// Login credentials for the new account.
    pub credentials: Credentials,
}

impl Registration {
    /// Builds a registration; the name is trimmed.
    #[must_use]
    pub fn new(name: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            name: name.into().trim().to_string(),
            phone: None,
            credentials,
        }
    }

    /// Sets the optional contact phone.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}
