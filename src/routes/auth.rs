//! Auth routes: login, logout, admin registration.
//!
//! Login is the one route that reads the backend payload instead of
//! relaying it: the session token is pulled out of `data.jwtToken` and moved
//! into the `token` cookie, and the browser only sees a generic message.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::proxy::{self, RouteMessages};
use super::session::{cleared_session_cookie, session_cookie};
use crate::backend::{BackendRequest, ForwardBody};
use crate::forms::LoginForm;
use crate::models::MessageBody;
use crate::state::AppState;

const DEFAULT_DEVICE_TYPE: &str = "web";
const DEFAULT_BROWSER_INFO: &str = "next-js-app";

const LOGIN_FAILED: &str = "Login failed";
const LOGIN_ERROR: &str = "Internal server error";
const NO_TOKEN: &str = "No token received from server";

const REGISTER_MESSAGES: RouteMessages = RouteMessages {
    upstream: "Registration failed",
    unreachable: "An error occurred during registration",
    not_found: None,
};

const VERIFY_MESSAGE: &str = "This endpoint is not in use. Authentication is handled by middleware.";

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(flatten)]
    pub credentials: LoginForm,
    pub device_type: Option<String>,
    pub browser_info: Option<String>,
}

/// Body sent to the backend's `admin/auth/login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BackendLogin<'a> {
    username_or_email: &'a str,
    password: &'a str,
    device_type: &'a str,
    browser_info: &'a str,
}

/// `data.jwtToken` from a login payload, if it is a non-empty string.
pub(crate) fn extract_jwt(payload: &serde_json::Value) -> Option<&str> {
    payload
        .pointer("/data/jwtToken")
        .and_then(serde_json::Value::as_str)
        .filter(|token| !token.is_empty())
}

/// `POST /api/auth/login`: authenticate against the backend, set cookie.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    request.credentials.validate_credentials()?;

    let payload = BackendLogin {
        username_or_email: &request.credentials.username_or_email,
        password: &request.credentials.password,
        device_type: request.device_type.as_deref().unwrap_or(DEFAULT_DEVICE_TYPE),
        browser_info: request.browser_info.as_deref().unwrap_or(DEFAULT_BROWSER_INFO),
    };
    let payload = serde_json::to_value(&payload).map_err(|e| {
        tracing::error!(error = %e, "login payload serialization failed");
        ApiError::Unreachable(LOGIN_ERROR)
    })?;

    let backend_request =
        BackendRequest::new(Method::POST, ["admin", "auth", "login"]).body(ForwardBody::Json(payload));
    let messages = RouteMessages::same(LOGIN_ERROR);
    let response = proxy::forward(state.backend.as_ref(), backend_request, messages)
        .await
        .map_err(|e| e.with_backend_message(LOGIN_FAILED))?;

    let data: serde_json::Value = response.json().map_err(|e| {
        tracing::error!(error = %e, "login response was not JSON");
        ApiError::Unreachable(LOGIN_ERROR)
    })?;
    let Some(token) = extract_jwt(&data) else {
        tracing::error!("login response carried no data.jwtToken");
        return Err(ApiError::MalformedPayload(NO_TOKEN));
    };

    tracing::info!("login succeeded; session cookie issued");
    let jar = jar.add(session_cookie(token.to_owned(), state.config.cookie_secure));
    Ok((jar, Json(MessageBody::new("Login successful"))).into_response())
}

// =============================================================================
// LOGOUT
// =============================================================================

/// `POST /api/auth/logout`: clear the session cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(cleared_session_cookie(state.config.cookie_secure));
    (jar, Json(MessageBody::new("Logout successful")))
}

// =============================================================================
// REGISTER
// =============================================================================

/// `POST /api/admin/auth/register`: forward registration; 201 on success.
pub async fn register(State(state): State<AppState>, body: ForwardBody) -> Result<Response, ApiError> {
    let request = BackendRequest::new(Method::POST, ["admin", "auth", "register"]).body(body);
    let response = proxy::forward(state.backend.as_ref(), request, REGISTER_MESSAGES)
        .await
        .map_err(|e| e.with_backend_message(REGISTER_MESSAGES.upstream))?;
    proxy::relay_json(&response, StatusCode::CREATED, REGISTER_MESSAGES)
}

// =============================================================================
// VERIFY
// =============================================================================

/// `GET|POST /api/auth/verify`: retired; page gating happens in the route guard.
pub async fn verify() -> Json<MessageBody> {
    Json(MessageBody::new(VERIFY_MESSAGE))
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
