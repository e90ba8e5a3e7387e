//! Generic forward-and-relay used by every passthrough route.
//!
//! A route supplies the messages its failures should carry; this module
//! turns the backend outcome into either the relayed JSON or an `ApiError`.
//! Login does not go through [`relay`]: it inspects the backend payload.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use super::error::ApiError;
use crate::backend::{Backend, BackendRequest, BackendResponse};

/// Failure messages for one route.
#[derive(Debug, Clone, Copy)]
pub struct RouteMessages {
    /// Backend answered non-2xx.
    pub upstream: &'static str,
    /// Transport failure or unreadable success body.
    pub unreachable: &'static str,
    /// Set on routes that translate a backend 404.
    pub not_found: Option<&'static str>,
}

impl RouteMessages {
    #[must_use]
    pub const fn same(message: &'static str) -> Self {
        Self { upstream: message, unreachable: message, not_found: None }
    }
}

/// Send `request`; succeed only on a 2xx backend status.
///
/// # Errors
///
/// `Unreachable` on transport failure, `NotFound` on a translated 404,
/// `Upstream` (status and raw body preserved) on any other non-2xx.
pub async fn forward(
    backend: &dyn Backend,
    request: BackendRequest,
    messages: RouteMessages,
) -> Result<BackendResponse, ApiError> {
    let path = request.display_path();
    let method = request.method.clone();

    let response = backend.send(request).await.map_err(|e| {
        tracing::error!(error = %e, %method, %path, "backend request failed");
        ApiError::Unreachable(messages.unreachable)
    })?;

    if response.status.is_success() {
        tracing::debug!(status = response.status.as_u16(), %method, %path, "backend request ok");
        return Ok(response);
    }

    let details = response.text();
    tracing::warn!(
        status = response.status.as_u16(),
        %method,
        %path,
        body = details.as_deref().unwrap_or_default(),
        "backend returned error status"
    );

    if response.status == StatusCode::NOT_FOUND {
        if let Some(message) = messages.not_found {
            return Err(ApiError::NotFound(message));
        }
    }

    Err(ApiError::Upstream { status: response.status, message: messages.upstream.to_owned(), details })
}

/// Relay a successful backend body as JSON with `status`.
///
/// # Errors
///
/// `Unreachable` when the body is not JSON.
pub fn relay_json(response: &BackendResponse, status: StatusCode, messages: RouteMessages) -> Result<Response, ApiError> {
    let value: serde_json::Value = response.json().map_err(|e| {
        tracing::error!(error = %e, "backend returned malformed JSON");
        ApiError::Unreachable(messages.unreachable)
    })?;
    Ok((status, Json(value)).into_response())
}

/// [`forward`] then [`relay_json`].
///
/// # Errors
///
/// See [`forward`] and [`relay_json`].
pub async fn relay(
    backend: &dyn Backend,
    request: BackendRequest,
    status: StatusCode,
    messages: RouteMessages,
) -> Result<Response, ApiError> {
    let response = forward(backend, request, messages).await?;
    relay_json(&response, status, messages)
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
