//! Backend client over `reqwest`.
//!
//! Thin HTTP wrapper: builds the URL, attaches the bearer token, re-encodes
//! the body, and returns status plus raw bytes. No retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::multipart::{Form, Part};

use super::{Backend, BackendError, BackendRequest, BackendResponse, ForwardBody, FormPart, join_url, parse_base_url};

pub struct HttpBackend {
    http: reqwest::Client,
    base: Url,
}

impl HttpBackend {
    /// Build a client for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to build.
    pub fn new(base_url: &str, connect_timeout: Duration) -> Result<Self, BackendError> {
        let base = parse_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| BackendError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn send(&self, request: BackendRequest) -> Result<BackendResponse, BackendError> {
        let url = join_url(&self.base, &request.path, request.query.as_deref())?;
        let mut builder = self.http.request(request.method, url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            ForwardBody::Empty => builder,
            ForwardBody::Json(value) => builder.json(&value),
            // Content-Type is left to reqwest so the boundary matches the new body.
            ForwardBody::Multipart(parts) => builder.multipart(build_form(parts)?),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        Ok(BackendResponse { status, body })
    }
}

fn build_form(parts: Vec<FormPart>) -> Result<Form, BackendError> {
    let mut form = Form::new();
    for part in parts {
        let mut outbound = Part::bytes(part.data.to_vec());
        if let Some(file_name) = part.file_name {
            outbound = outbound.file_name(file_name);
        }
        if let Some(content_type) = part.content_type.as_deref() {
            outbound = outbound
                .mime_str(content_type)
                .map_err(|e| BackendError::InvalidPart { name: part.name.clone(), reason: e.to_string() })?;
        }
        form = form.part(part.name, outbound);
    }
    Ok(form)
}
