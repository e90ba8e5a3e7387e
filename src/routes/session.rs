//! Session cookie guard.
//!
//! The `token` cookie is an opaque bearer credential issued by the backend.
//! It is never decoded here: presence is all that is checked, and expiry or
//! revocation surfaces as a backend 401 that is relayed as-is.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use super::error::ApiError;

pub const SESSION_COOKIE: &str = "token";
pub const SESSION_MAX_AGE: Duration = Duration::days(1);

/// Bearer token read from the session cookie.
/// Use as a handler parameter to require a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl SessionToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Token from raw request headers, if a non-empty cookie is present.
    #[must_use]
    pub fn from_headers(headers: &axum::http::HeaderMap) -> Option<Self> {
        let jar = CookieJar::from_headers(headers);
        jar.get(SESSION_COOKIE)
            .map(Cookie::value)
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_owned()))
    }
}

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers).ok_or(ApiError::Unauthenticated)
    }
}

/// Session cookie set after a successful login.
#[must_use]
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(SESSION_MAX_AGE)
        .build()
}

/// Expired, empty cookie that removes the session on logout.
#[must_use]
pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
