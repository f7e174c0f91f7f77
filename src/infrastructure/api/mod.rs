//! Listings backend API client.

mod client;
mod cookies;
mod dto;

pub use client::{DEFAULT_API_BASE, HttpAuthClient};
pub use cookies::{SESSION_COOKIES_KEY, SessionCookieJar};
