//! Route guard for console pages.
//!
//! A stateless decision over the request path and the presence (not the
//! validity) of the session cookie. API routes never match a guarded path
//! and carry their own cookie check.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use super::session::SessionToken;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

const PROTECTED_PREFIXES: [&str; 2] = ["/users", "/blogs"];
const AUTH_PAGES: [&str; 2] = ["/login", "/register"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    RedirectToLogin,
    RedirectToHome,
    PassThrough,
}

/// `/`, `/users`, `/blogs`, or anything below the latter two.
#[must_use]
pub fn is_protected_path(path: &str) -> bool {
    path == HOME_PATH
        || PROTECTED_PREFIXES.iter().any(|prefix| {
            path.strip_prefix(prefix)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        })
}

#[must_use]
pub fn is_auth_path(path: &str) -> bool {
    AUTH_PAGES.contains(&path)
}

#[must_use]
pub fn decide(path: &str, has_session: bool) -> GuardDecision {
    if !has_session && is_protected_path(path) {
        GuardDecision::RedirectToLogin
    } else if has_session && is_auth_path(path) {
        GuardDecision::RedirectToHome
    } else {
        GuardDecision::PassThrough
    }
}

/// Middleware applying [`decide`] to every request.
pub async fn page_guard(request: Request, next: Next) -> Response {
    let has_session = SessionToken::from_headers(request.headers()).is_some();
    match decide(request.uri().path(), has_session) {
        GuardDecision::RedirectToLogin => Redirect::temporary(LOGIN_PATH).into_response(),
        GuardDecision::RedirectToHome => Redirect::temporary(HOME_PATH).into_response(),
        GuardDecision::PassThrough => next.run(request).await,
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
