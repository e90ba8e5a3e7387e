use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION};
use axum::http::Request;

use super::*;
use crate::state::test_helpers::{MockBackend, call, session_cookie_header, test_config};

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(COOKIE, session_cookie_header(token));
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn healthz_is_ok() {
    let backend = Arc::new(MockBackend::new());
    let (status, _, _) = call(&backend, get("/healthz", None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn protected_page_without_session_redirects_to_login() {
    let backend = Arc::new(MockBackend::new());
    for path in ["/", "/users", "/blogs/new"] {
        let (status, headers, _) = call(&backend, get(path, None)).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(headers[LOCATION], "/login", "{path}");
    }
}

#[tokio::test]
async fn auth_page_with_session_redirects_home() {
    let backend = Arc::new(MockBackend::new());
    for path in ["/login", "/register"] {
        let (status, headers, _) = call(&backend, get(path, Some("jwt"))).await;
        assert_eq!(status, StatusCode::TEMPORARY_REDIRECT, "{path}");
        assert_eq!(headers[LOCATION], "/", "{path}");
    }
}

#[tokio::test]
async fn empty_cookie_counts_as_no_session() {
    let backend = Arc::new(MockBackend::new());
    let (status, headers, _) = call(&backend, get("/blogs", Some(""))).await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(headers[LOCATION], "/login");
}

#[tokio::test]
async fn api_routes_are_not_redirected() {
    let backend = Arc::new(MockBackend::new());
    let (status, headers, body) = call(&backend, get("/api/blogs", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(headers.get(LOCATION).is_none());
    assert_eq!(body["message"], "No token found");
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn console_pages_fall_back_to_index_html() {
    let static_dir = test_config().static_dir;
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("index.html"), "<!doctype html><title>console</title>").unwrap();

    let backend = Arc::new(MockBackend::new());
    for (path, token) in [("/blogs/new", Some("jwt")), ("/login", None)] {
        let (status, headers, _) = call(&backend, get(path, token)).await;
        assert_eq!(status, StatusCode::OK, "{path}");
        let content_type = headers[CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"), "{path}: {content_type}");
    }
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn unknown_api_paths_answer_json_404() {
    let backend = Arc::new(MockBackend::new());
    for (path, token) in [("/api/blogs/1/comments", Some("t")), ("/api/unknown", Some("t")), ("/api/unknown", None)] {
        let (status, headers, body) = call(&backend, get(path, token)).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{path}");
        let content_type = headers[CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("application/json"), "{path}: {content_type}");
        assert_eq!(body, serde_json::json!({ "message": "Not found" }), "{path}");
    }
    assert!(backend.requests().is_empty());
}
