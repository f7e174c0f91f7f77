//! Session cookie store that survives restarts.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::ports::StoragePort;

/// Storage key holding the backend's session cookies.
pub const SESSION_COOKIES_KEY: &str = "session-cookies";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCookie {
    url: String,
    raw: String,
}

/// Cookie jar that mirrors every `Set-Cookie` into durable storage.
///
/// Stored cookies are replayed into a fresh jar on construction, so a login
/// made in one run authenticates `/auth/me` in the next. Expiry and domain
/// matching stay with [`reqwest::cookie::Jar`].
pub struct SessionCookieJar {
    jar: Jar,
    stored: Mutex<BTreeMap<String, StoredCookie>>,
    storage: Option<Arc<dyn StoragePort>>,
}

impl SessionCookieJar {
    /// Jar that keeps cookies for this process only.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(None)
    }

    /// Jar backed by `storage`, preloaded with what it holds.
    #[must_use]
    pub fn new(storage: Option<Arc<dyn StoragePort>>) -> Self {
        let stored = storage.as_deref().map(load).unwrap_or_default();
        let jar = Jar::default();

        for cookie in stored.values() {
            match Url::parse(&cookie.url) {
                Ok(url) => jar.add_cookie_str(&cookie.raw, &url),
                Err(e) => warn!(url = %cookie.url, error = %e, "Skipping stored cookie"),
            }
        }
        if !stored.is_empty() {
            debug!(count = stored.len(), "Session cookies restored");
        }

        Self {
            jar,
            stored: Mutex::new(stored),
            storage,
        }
    }

    fn remember(&self, headers: &[&HeaderValue], url: &Url) {
        let Some(storage) = &self.storage else {
            return;
        };

        let mut stored = self.stored.lock();
        let mut changed = false;
        for header in headers {
            let Ok(raw) = header.to_str() else {
                continue;
            };
            let Some(name) = cookie_name(raw) else {
                continue;
            };
            let key = format!("{}|{name}", url.host_str().unwrap_or_default());

            if is_removal(raw) {
                changed |= stored.remove(&key).is_some();
            } else {
                let cookie = StoredCookie {
                    url: url.as_str().to_string(),
                    raw: raw.to_string(),
                };
                stored.insert(key, cookie);
                changed = true;
            }
        }
        if !changed {
            return;
        }

        let result = serde_json::to_string(&*stored)
            .map_err(|e| e.to_string())
            .and_then(|blob| {
                storage
                    .set(SESSION_COOKIES_KEY, &blob)
                    .map_err(|e| e.to_string())
            });
        match result {
            Ok(()) => debug!(count = stored.len(), "Session cookies persisted"),
            Err(error) => warn!(%error, "Failed to persist session cookies"),
        }
    }
}

impl CookieStore for SessionCookieJar {
    fn set_cookies(&self, cookie_headers: &mut dyn Iterator<Item = &HeaderValue>, url: &Url) {
        let headers: Vec<&HeaderValue> = cookie_headers.collect();
        self.jar.set_cookies(&mut headers.iter().copied(), url);
        self.remember(&headers, url);
    }

    fn cookies(&self, url: &Url) -> Option<HeaderValue> {
        self.jar.cookies(url)
    }
}

fn load(storage: &dyn StoragePort) -> BTreeMap<String, StoredCookie> {
    let raw = match storage.get(SESSION_COOKIES_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BTreeMap::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read session cookies");
            return BTreeMap::new();
        }
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring corrupt session cookies");
        BTreeMap::new()
    })
}

fn cookie_name(raw: &str) -> Option<&str> {
    let pair = raw.split(';').next()?;
    let (name, _) = pair.split_once('=')?;
    let name = name.trim();
    (!name.is_empty()).then_some(name)
}

/// A cookie the server sent to clear a previous one.
fn is_removal(raw: &str) -> bool {
    let mut parts = raw.split(';');
    let value_empty = parts
        .next()
        .and_then(|pair| pair.split_once('='))
        .is_some_and(|(_, value)| value.trim().is_empty());

    value_empty
        || parts.any(|attr| {
            attr.split_once('=').is_some_and(|(name, value)| {
                name.trim().eq_ignore_ascii_case("max-age") && value.trim().starts_with(['0', '-'])
            })
        })
}
