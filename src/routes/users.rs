//! Admin user routes. Read-only apart from the active flag toggle.

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::Response;

use super::error::ApiError;
use super::proxy::{self, RouteMessages};
use super::session::SessionToken;
use crate::backend::BackendRequest;
use crate::state::AppState;

const LIST_MESSAGES: RouteMessages = RouteMessages::same("Failed to fetch users");
const TOGGLE_MESSAGES: RouteMessages = RouteMessages::same("Failed to toggle user status");

/// `GET /api/admin/users`: list accounts.
pub async fn list_users(State(state): State<AppState>, token: SessionToken) -> Result<Response, ApiError> {
    let request = BackendRequest::new(Method::GET, ["admin", "users"]).bearer(token.0);
    proxy::relay(state.backend.as_ref(), request, StatusCode::OK, LIST_MESSAGES).await
}

/// `PUT /api/admin/users/:user_id/status`: flip `isActive`.
pub async fn toggle_status(
    State(state): State<AppState>,
    token: SessionToken,
    Path(user_id): Path<i64>,
) -> Result<Response, ApiError> {
    let request =
        BackendRequest::new(Method::PUT, ["admin".to_owned(), "users".to_owned(), user_id.to_string(), "status".to_owned()])
            .bearer(token.0);
    proxy::relay(state.backend.as_ref(), request, StatusCode::OK, TOGGLE_MESSAGES).await
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
