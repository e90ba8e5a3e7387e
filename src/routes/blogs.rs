//! Blog routes: list, create, read, update, delete, image upload.
//!
//! Create, update and upload accept multipart bodies that are forwarded
//! part by part; update also accepts JSON.

use axum::extract::{Path, RawQuery, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};

use super::body::find_part;
use super::error::ApiError;
use super::proxy::{self, RouteMessages};
use super::session::SessionToken;
use crate::backend::{BackendRequest, ForwardBody};
use crate::models::MessageBody;
use crate::state::AppState;

const LIST_MESSAGES: RouteMessages = RouteMessages::same("Failed to fetch blogs");
const CREATE_MESSAGES: RouteMessages = RouteMessages::same("Failed to create blog");
const READ_MESSAGES: RouteMessages = RouteMessages {
    upstream: "Failed to fetch blog",
    unreachable: "Failed to fetch blog details",
    not_found: Some("Blog not found"),
};
const UPDATE_MESSAGES: RouteMessages = RouteMessages::same("Failed to update blog");
const DELETE_MESSAGES: RouteMessages = RouteMessages::same("Failed to delete blog");
const UPLOAD_MESSAGES: RouteMessages = RouteMessages::same("Failed to upload image");

fn blog_path(key: impl Into<String>) -> [String; 2] {
    ["blogs".to_owned(), key.into()]
}

fn log_multipart(route: &str, body: &ForwardBody) {
    let ForwardBody::Multipart(parts) = body else {
        return;
    };
    let names: Vec<&str> = parts.iter().map(|p| p.name.as_str()).collect();
    let has_data = find_part(parts, "data").is_some();
    tracing::debug!(route, parts = ?names, has_data, "forwarding multipart body");
}

/// `GET /api/blogs`: list; the query string is forwarded unchanged.
pub async fn list_blogs(
    State(state): State<AppState>,
    token: SessionToken,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let request = BackendRequest::new(Method::GET, ["blogs"]).bearer(token.0).query(query);
    proxy::relay(state.backend.as_ref(), request, StatusCode::OK, LIST_MESSAGES).await
}

/// `POST /api/blogs`: create from a `data` JSON part plus optional `coverImage`.
pub async fn create_blog(
    State(state): State<AppState>,
    token: SessionToken,
    body: ForwardBody,
) -> Result<Response, ApiError> {
    log_multipart("create_blog", &body);
    let request = BackendRequest::new(Method::POST, ["blogs"]).bearer(token.0).body(body);
    proxy::relay(state.backend.as_ref(), request, StatusCode::CREATED, CREATE_MESSAGES).await
}

/// `GET /api/blogs/:id`.
pub async fn get_blog(
    State(state): State<AppState>,
    token: SessionToken,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let request = BackendRequest::new(Method::GET, blog_path(id.to_string())).bearer(token.0);
    proxy::relay(state.backend.as_ref(), request, StatusCode::OK, READ_MESSAGES).await
}

/// `GET /api/blogs/by-slug/:slug`: the backend resolves slugs on its blog path.
pub async fn get_blog_by_slug(
    State(state): State<AppState>,
    token: SessionToken,
    Path(slug): Path<String>,
) -> Result<Response, ApiError> {
    let request = BackendRequest::new(Method::GET, blog_path(slug)).bearer(token.0);
    proxy::relay(state.backend.as_ref(), request, StatusCode::OK, READ_MESSAGES).await
}

/// `PUT /api/blogs/:id`: multipart or JSON update.
pub async fn update_blog(
    State(state): State<AppState>,
    token: SessionToken,
    Path(id): Path<i64>,
    body: ForwardBody,
) -> Result<Response, ApiError> {
    log_multipart("update_blog", &body);
    let request = BackendRequest::new(Method::PUT, blog_path(id.to_string())).bearer(token.0).body(body);
    proxy::relay(state.backend.as_ref(), request, StatusCode::OK, UPDATE_MESSAGES).await
}

/// `DELETE /api/blogs/:id`: answers a fixed message instead of the backend body.
pub async fn delete_blog(
    State(state): State<AppState>,
    token: SessionToken,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let request = BackendRequest::new(Method::DELETE, blog_path(id.to_string())).bearer(token.0);
    proxy::forward(state.backend.as_ref(), request, DELETE_MESSAGES).await?;
    Ok(Json(MessageBody::new("Blog deleted successfully")).into_response())
}

/// `POST /api/blogs/upload-image`: standalone image upload; 201 on success.
pub async fn upload_image(
    State(state): State<AppState>,
    token: SessionToken,
    body: ForwardBody,
) -> Result<Response, ApiError> {
    log_multipart("upload_image", &body);
    let request = BackendRequest::new(Method::POST, ["blogs", "upload-image"]).bearer(token.0).body(body);
    proxy::relay(state.backend.as_ref(), request, StatusCode::CREATED, UPLOAD_MESSAGES).await
}

#[cfg(test)]
#[path = "blogs_test.rs"]
mod tests;
