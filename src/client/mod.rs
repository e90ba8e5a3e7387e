//! Client data services for the console API.
//!
//! DESIGN
//! ======
//! `ConsoleClient` talks to this gateway's `/api` routes, never to the
//! backend directly. It keeps the session cookie in its own cookie store,
//! so a successful `login` authenticates every later call. Form input is
//! validated before any request is built; every non-2xx answer becomes
//! [`ClientError::Status`] carrying the envelope's message.

pub mod envelope;
pub mod media;

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::backend::{join_url, parse_base_url};
use crate::forms::{BlogForm, LoginForm, RegisterForm, ValidationError};
use crate::models::{Blog, BlogPatch, ErrorEnvelope, UploadedImage, User};

pub use envelope::{normalize_list, normalize_single};
pub use media::{blog_image_url, image_label, resolve_image_url};

const REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// The action exists in the console but is switched off.
    #[error("{0} is disabled")]
    ActionDisabled(&'static str),

    #[error("{message} (status {status})")]
    Status { status: u16, message: String },

    #[error("invalid console url: {0}")]
    InvalidUrl(String),

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// HTTP status, when the gateway answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A file chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

impl Upload {
    fn into_part(self) -> Result<Part, ClientError> {
        let part = Part::bytes(self.data).file_name(self.file_name);
        match self.content_type {
            Some(content_type) => Ok(part.mime_str(&content_type)?),
            None => Ok(part),
        }
    }
}

/// Case-insensitive title or slug match; an empty query keeps everything.
#[must_use]
pub fn filter_blogs<'a>(blogs: &'a [Blog], query: &str) -> Vec<&'a Blog> {
    let query = query.trim().to_lowercase();
    blogs
        .iter()
        .filter(|blog| {
            query.is_empty()
                || blog.title.to_lowercase().contains(&query)
                || blog.slug.to_lowercase().contains(&query)
        })
        .collect()
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct ConsoleClient {
    http: reqwest::Client,
    base: Url,
    cdn_base_url: Option<String>,
}

impl ConsoleClient {
    /// Build a client for the gateway at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the HTTP client fails to build.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let base = parse_base_url(base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base, cdn_base_url: None })
    }

    #[must_use]
    pub fn with_cdn_base_url(mut self, cdn_base_url: Option<String>) -> Self {
        self.cdn_base_url = cdn_base_url;
        self
    }

    /// Display URL for a blog cover, using the configured CDN.
    #[must_use]
    pub fn image_url(&self, blog: &Blog) -> Option<String> {
        blog_image_url(blog, self.cdn_base_url.as_deref())
    }

    fn request(&self, method: Method, segments: &[&str], query: Option<&str>) -> Result<RequestBuilder, ClientError> {
        let url = join_url(&self.base, segments, query).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        Ok(self.http.request(method, url))
    }

    /// Send and return the JSON body of a 2xx answer.
    async fn send(builder: RequestBuilder, fallback: &str) -> Result<serde_json::Value, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .map(|envelope| envelope.message)
                .unwrap_or_else(|_| fallback.to_owned());
            return Err(ClientError::Status { status: status.as_u16(), message });
        }
        if text.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }

    async fn send_single<T: DeserializeOwned>(builder: RequestBuilder, fallback: &str) -> Result<T, ClientError> {
        let value = Self::send(builder, fallback).await?;
        Ok(normalize_single(value)?)
    }

    // -------------------------------------------------------------------------
    // auth
    // -------------------------------------------------------------------------

    /// Log in; the gateway's session cookie is kept for later calls.
    ///
    /// # Errors
    ///
    /// `Validation` before any request, `Status` when the gateway refuses.
    pub async fn login(&self, form: &LoginForm) -> Result<(), ClientError> {
        form.validate()?;
        let builder = self.request(Method::POST, &["api", "auth", "login"], None)?.json(form);
        Self::send(builder, "Login failed").await?;
        Ok(())
    }

    /// Register an admin account.
    ///
    /// # Errors
    ///
    /// `Validation` before any request, `Status` when the gateway refuses.
    pub async fn register(&self, form: &RegisterForm) -> Result<serde_json::Value, ClientError> {
        form.validate()?;
        let builder = self
            .request(Method::POST, &["api", "admin", "auth", "register"], None)?
            .json(&form.payload());
        Self::send(builder, "Registration failed").await
    }

    /// Clear the session cookie.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-2xx answer.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let builder = self.request(Method::POST, &["api", "auth", "logout"], None)?;
        Self::send(builder, "Logout failed").await?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // users
    // -------------------------------------------------------------------------

    /// # Errors
    ///
    /// Fails on transport errors, a non-2xx answer, or items that are not users.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let builder = self.request(Method::GET, &["api", "admin", "users"], None)?;
        let value = Self::send(builder, "Failed to fetch users").await?;
        Ok(normalize_list(value)?)
    }

    /// Flip a user's active flag.
    ///
    /// # Errors
    ///
    /// Fails on transport errors or a non-2xx answer.
    pub async fn toggle_user_status(&self, user_id: i64) -> Result<serde_json::Value, ClientError> {
        let id = user_id.to_string();
        let builder = self.request(Method::PUT, &["api", "admin", "users", &id, "status"], None)?;
        Self::send(builder, "Failed to toggle user status").await
    }

    /// Deleting accounts is disabled; nothing is sent.
    ///
    /// # Errors
    ///
    /// Always returns [`ClientError::ActionDisabled`].
    pub fn delete_user(&self, user_id: i64) -> Result<(), ClientError> {
        tracing::debug!(user_id, "delete user refused");
        Err(ClientError::ActionDisabled("deleting users"))
    }

    /// Editing accounts is disabled; nothing is sent.
    ///
    /// # Errors
    ///
    /// Always returns [`ClientError::ActionDisabled`].
    pub fn edit_user(&self, user_id: i64) -> Result<(), ClientError> {
        tracing::debug!(user_id, "edit user refused");
        Err(ClientError::ActionDisabled("editing users"))
    }

    // -------------------------------------------------------------------------
    // blogs
    // -------------------------------------------------------------------------

    /// List blogs; `query` is passed through as the raw query string.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, a non-2xx answer, or items that are not blogs.
    pub async fn list_blogs(&self, query: Option<&str>) -> Result<Vec<Blog>, ClientError> {
        let builder = self.request(Method::GET, &["api", "blogs"], query)?;
        let value = Self::send(builder, "Failed to fetch blogs").await?;
        Ok(normalize_list(value)?)
    }

    /// # Errors
    ///
    /// `Status` 404 when the blog does not exist.
    pub async fn get_blog(&self, id: i64) -> Result<Blog, ClientError> {
        let id = id.to_string();
        let builder = self.request(Method::GET, &["api", "blogs", &id], None)?;
        Self::send_single(builder, "Failed to fetch blog").await
    }

    /// # Errors
    ///
    /// `Status` 404 when the blog does not exist.
    pub async fn get_blog_by_slug(&self, slug: &str) -> Result<Blog, ClientError> {
        let builder = self.request(Method::GET, &["api", "blogs", "by-slug", slug], None)?;
        Self::send_single(builder, "Failed to fetch blog").await
    }

    /// Create a blog from the form, with an optional cover file.
    ///
    /// # Errors
    ///
    /// `Validation` before any request, `Status` when the gateway refuses.
    pub async fn create_blog(&self, form: &BlogForm, cover: Option<Upload>) -> Result<Blog, ClientError> {
        form.validate()?;
        let draft = form.draft(cover.is_some());
        let mut multipart = Form::new().text("data", serde_json::to_string(&draft)?);
        if let Some(cover) = cover {
            multipart = multipart.part("coverImage", cover.into_part()?);
        }
        let builder = self.request(Method::POST, &["api", "blogs"], None)?.multipart(multipart);
        Self::send_single(builder, "Failed to create blog").await
    }

    /// # Errors
    ///
    /// Fails on transport errors or a non-2xx answer.
    pub async fn update_blog(&self, id: i64, patch: &BlogPatch) -> Result<Blog, ClientError> {
        let id = id.to_string();
        let builder = self.request(Method::PUT, &["api", "blogs", &id], None)?.json(patch);
        Self::send_single(builder, "Failed to update blog").await
    }

    /// # Errors
    ///
    /// Fails on transport errors or a non-2xx answer.
    pub async fn delete_blog(&self, id: i64) -> Result<(), ClientError> {
        let id = id.to_string();
        let builder = self.request(Method::DELETE, &["api", "blogs", &id], None)?;
        Self::send(builder, "Failed to delete blog").await?;
        Ok(())
    }

    /// Upload an image for use inside post content.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, a non-2xx answer, or a body without `url`.
    pub async fn upload_image(&self, file: Upload) -> Result<UploadedImage, ClientError> {
        let multipart = Form::new().part("file", file.into_part()?);
        let builder = self.request(Method::POST, &["api", "blogs", "upload-image"], None)?.multipart(multipart);
        Self::send_single(builder, "Failed to upload image").await
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
