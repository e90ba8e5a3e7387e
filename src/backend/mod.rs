//! Backend: the external system of record behind every proxy route.
//!
//! DESIGN
//! ======
//! Handlers describe a call as a [`BackendRequest`] (method, resource path
//! segments, query, bearer token, body) and hand it to a [`Backend`]. The
//! production implementation is [`http::HttpBackend`]; tests substitute an
//! in-memory fake. A backend only fails for transport reasons: a non-2xx
//! status is a successful round trip and is interpreted by the caller.

pub mod http;

use axum::body::Bytes;
use axum::http::{Method, StatusCode};
use reqwest::Url;
use serde::de::DeserializeOwned;

pub use http::HttpBackend;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The base URL cannot carry path segments.
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    /// A forwarded multipart part could not be rebuilt.
    #[error("invalid multipart part `{name}`: {reason}")]
    InvalidPart { name: String, reason: String },

    /// Connecting, sending, or reading the response body failed.
    #[error("backend transport failed: {0}")]
    Transport(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// REQUEST / RESPONSE
// =============================================================================

/// One part of a forwarded `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FormPart {
    /// A plain text field.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), file_name: None, content_type: None, data: Bytes::from(value.into()) }
    }

    /// Field value as UTF-8, if it is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

/// Body forwarded to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardBody {
    Empty,
    Json(serde_json::Value),
    /// Parts are re-sent in order; the outbound boundary is regenerated.
    Multipart(Vec<FormPart>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub method: Method,
    /// Resource path segments appended to the base URL, unencoded.
    pub path: Vec<String>,
    /// Raw query string forwarded verbatim (no leading `?`).
    pub query: Option<String>,
    /// Session token sent as `Authorization: Bearer <token>`.
    pub bearer: Option<String>,
    pub body: ForwardBody,
}

impl BackendRequest {
    #[must_use]
    pub fn new<I, S>(method: Method, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            path: path.into_iter().map(Into::into).collect(),
            query: None,
            bearer: None,
            body: ForwardBody::Empty,
        }
    }

    #[must_use]
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    #[must_use]
    pub fn query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    #[must_use]
    pub fn body(mut self, body: ForwardBody) -> Self {
        self.body = body;
        self
    }

    /// Path as logged, e.g. `blogs/12`.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.path.join("/")
    }
}

#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl BackendResponse {
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self { status, body: body.into() }
    }

    /// Parse the body as JSON. An empty body parses as JSON `null` when `T`
    /// accepts it.
    ///
    /// # Errors
    ///
    /// Returns the serde error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_value(serde_json::Value::Null);
        }
        serde_json::from_slice(&self.body)
    }

    /// Raw body as text, or `None` when empty.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let text = String::from_utf8_lossy(&self.body);
        if text.trim().is_empty() { None } else { Some(text.into_owned()) }
    }
}

// =============================================================================
// TRAIT
// =============================================================================

#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Perform one forwarded call.
    ///
    /// # Errors
    ///
    /// Returns an error only when the round trip itself fails.
    async fn send(&self, request: BackendRequest) -> Result<BackendResponse, BackendError>;
}

// =============================================================================
// URLS
// =============================================================================

/// Append path segments (percent-encoded) and a raw query to `base`.
///
/// A trailing slash on `base` is tolerated, so `http://h/api` and
/// `http://h/api/` produce the same result.
///
/// # Errors
///
/// Returns [`BackendError::InvalidUrl`] when `base` cannot be a base URL.
pub fn join_url<S: AsRef<str>>(base: &Url, segments: &[S], query: Option<&str>) -> Result<Url, BackendError> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| BackendError::InvalidUrl(base.to_string()))?;
        path.pop_if_empty();
        path.extend(segments.iter().map(AsRef::as_ref));
    }
    url.set_query(query.filter(|q| !q.is_empty()));
    Ok(url)
}

/// Parse a configured base URL.
///
/// # Errors
///
/// Returns [`BackendError::InvalidUrl`] if the value is not an absolute URL.
pub fn parse_base_url(raw: &str) -> Result<Url, BackendError> {
    let url = Url::parse(raw.trim()).map_err(|e| BackendError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(BackendError::InvalidUrl(raw.to_owned()));
    }
    Ok(url)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
