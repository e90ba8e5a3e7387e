//! Proxy boundary errors and their JSON envelope.
//!
//! Every failure a route can produce ends up here and is answered as
//! `{ "message": ..., "details"?: ... }`. Nothing escapes as a bare status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::forms::ValidationError;
use crate::models::ErrorEnvelope;

pub(crate) const NO_TOKEN_MESSAGE: &str = "No token found";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No session cookie on a route that needs one.
    #[error("no session token")]
    Unauthenticated,

    /// Request body failed schema checks.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Request body could not be read at all.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Backend 404 on a route that names the missing resource.
    #[error("{0}")]
    NotFound(&'static str),

    /// Backend answered non-2xx; its status is preserved.
    #[error("upstream returned {status}: {message}")]
    Upstream { status: StatusCode, message: String, details: Option<String> },

    /// Network failure or unreadable backend body.
    #[error("upstream unreachable: {0}")]
    Unreachable(&'static str),

    /// Backend succeeded but a required field was missing.
    #[error("malformed upstream payload: {0}")]
    MalformedPayload(&'static str),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream { status, .. } => *status,
            Self::Unreachable(_) | Self::MalformedPayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Replace the generic upstream message with the backend's own
    /// `message` field, falling back to `fallback`. Details are dropped.
    #[must_use]
    pub fn with_backend_message(self, fallback: &str) -> Self {
        match self {
            Self::Upstream { status, details, .. } => {
                let message = details
                    .as_deref()
                    .and_then(backend_message)
                    .unwrap_or_else(|| fallback.to_owned());
                Self::Upstream { status, message, details: None }
            }
            other => other,
        }
    }

    fn envelope(self) -> ErrorEnvelope {
        match self {
            Self::Unauthenticated => ErrorEnvelope { message: NO_TOKEN_MESSAGE.into(), details: None },
            Self::Validation(err) => ErrorEnvelope { message: err.message.into(), details: None },
            Self::BadRequest(message) => ErrorEnvelope { message, details: None },
            Self::NotFound(message) | Self::Unreachable(message) | Self::MalformedPayload(message) => {
                ErrorEnvelope { message: message.into(), details: None }
            }
            Self::Upstream { message, details, .. } => ErrorEnvelope { message, details },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Upstream statuses outside 4xx/5xx would confuse clients.
        let status = if status.is_client_error() || status.is_server_error() {
            status
        } else {
            StatusCode::BAD_GATEWAY
        };
        (status, Json(self.envelope())).into_response()
    }
}

/// `message` string from a JSON error body, if present and non-empty.
pub(crate) fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
