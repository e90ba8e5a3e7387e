//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON proxy routes live under `/api`; every other path is served from the
//! console's static asset directory, falling back to `index.html` so client
//! side routes resolve. The page guard wraps the whole router and only acts
//! on console page paths.

pub mod auth;
pub mod blogs;
pub mod body;
pub mod error;
pub mod guard;
pub mod proxy;
pub mod session;
pub mod users;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware;
use axum::routing::{get, post, put};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use self::error::ApiError;
use crate::state::AppState;

const API_NOT_FOUND: &str = "Not found";

/// API routes, relative to `/api`. Unmatched paths answer a JSON 404 so
/// nothing under `/api` reaches the static pages.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/verify", get(auth::verify).post(auth::verify))
        .route("/admin/auth/register", post(auth::register))
        .route("/admin/users", get(users::list_users))
        .route("/admin/users/{user_id}/status", put(users::toggle_status))
        .route("/blogs", get(blogs::list_blogs).post(blogs::create_blog))
        .route("/blogs/upload-image", post(blogs::upload_image))
        .route("/blogs/by-slug/{slug}", get(blogs::get_blog_by_slug))
        .route(
            "/blogs/{id}",
            get(blogs::get_blog)
                .put(blogs::update_blog)
                .delete(blogs::delete_blog),
        )
        .fallback(api_not_found)
}

/// Full application: API, static console pages, guard, tracing.
pub fn app(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();
    let pages = ServeDir::new(&static_dir)
        .append_index_html_on_directories(true)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .nest("/api", api_routes())
        .route("/healthz", get(healthz))
        .fallback_service(pages)
        .layer(middleware::from_fn(guard::page_guard))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound(API_NOT_FOUND)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
