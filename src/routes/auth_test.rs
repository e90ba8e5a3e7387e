use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Request};
use serde_json::json;

use super::*;
use crate::state::test_helpers::{MockBackend, call, session_cookie_header};

fn json_post(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn login_body() -> serde_json::Value {
    json!({ "usernameOrEmail": "admin@example.com", "password": "secret12" })
}

fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

// =============================================================================
// extract_jwt
// =============================================================================

#[test]
fn extract_jwt_reads_nested_token() {
    let payload = json!({ "data": { "jwtToken": "abc" } });
    assert_eq!(extract_jwt(&payload), Some("abc"));
}

#[test]
fn extract_jwt_rejects_missing_empty_or_non_string() {
    assert_eq!(extract_jwt(&json!({ "data": {} })), None);
    assert_eq!(extract_jwt(&json!({ "jwtToken": "top-level" })), None);
    assert_eq!(extract_jwt(&json!({ "data": { "jwtToken": "" } })), None);
    assert_eq!(extract_jwt(&json!({ "data": { "jwtToken": 12 } })), None);
    assert_eq!(extract_jwt(&json!(null)), None);
}

// =============================================================================
// LOGIN
// =============================================================================

#[tokio::test]
async fn login_sets_session_cookie() {
    let backend = Arc::new(MockBackend::new());
    backend.respond_json(StatusCode::OK, &json!({ "data": { "jwtToken": "jwt-123", "role": "ADMIN" } }));

    let (status, headers, body) = call(&backend, json_post("/api/auth/login", &login_body())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Login successful" }));
    let cookies = set_cookies(&headers);
    assert_eq!(cookies.len(), 1);
    let cookie = &cookies[0];
    assert!(cookie.starts_with("token=jwt-123"), "{cookie}");
    assert!(cookie.contains("HttpOnly"), "{cookie}");
    assert!(cookie.contains("SameSite=Strict"), "{cookie}");
    assert!(cookie.contains("Max-Age=86400"), "{cookie}");
    assert!(cookie.contains("Path=/"), "{cookie}");
    assert!(!cookie.contains("Secure"), "{cookie}");
}

#[tokio::test]
async fn login_forwards_credentials_with_defaults() {
    let backend = Arc::new(MockBackend::new());
    backend.respond_json(StatusCode::OK, &json!({ "data": { "jwtToken": "t" } }));

    call(&backend, json_post("/api/auth/login", &login_body())).await;

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.path, vec!["admin", "auth", "login"]);
    assert_eq!(sent.bearer, None);
    assert_eq!(
        sent.body,
        ForwardBody::Json(json!({
            "usernameOrEmail": "admin@example.com",
            "password": "secret12",
            "deviceType": "web",
            "browserInfo": "next-js-app",
        }))
    );
}

#[tokio::test]
async fn login_forwards_explicit_device_info() {
    let backend = Arc::new(MockBackend::new());
    backend.respond_json(StatusCode::OK, &json!({ "data": { "jwtToken": "t" } }));
    let body = json!({ "usernameOrEmail": "admin", "password": "secret12", "deviceType": "cli", "browserInfo": "curl" });

    call(&backend, json_post("/api/auth/login", &body)).await;

    let ForwardBody::Json(sent) = &backend.requests()[0].body else {
        panic!("expected JSON body");
    };
    assert_eq!(sent["deviceType"], "cli");
    assert_eq!(sent["browserInfo"], "curl");
}

#[tokio::test]
async fn login_without_token_is_500_and_sets_no_cookie() {
    let backend = Arc::new(MockBackend::new());
    backend.respond_json(StatusCode::OK, &json!({ "data": { "user": "admin" } }));

    let (status, headers, body) = call(&backend, json_post("/api/auth/login", &login_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "No token received from server");
    assert!(set_cookies(&headers).is_empty());
}

#[tokio::test]
async fn login_upstream_error_uses_backend_message() {
    let backend = Arc::new(MockBackend::new());
    backend.respond_json(StatusCode::UNAUTHORIZED, &json!({ "message": "Bad credentials" }));

    let (status, headers, body) = call(&backend, json_post("/api/auth/login", &login_body())).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Bad credentials" }));
    assert!(set_cookies(&headers).is_empty());
}

#[tokio::test]
async fn login_upstream_error_without_message_falls_back() {
    let backend = Arc::new(MockBackend::new());
    backend.respond(StatusCode::FORBIDDEN, "");

    let (status, _, body) = call(&backend, json_post("/api/auth/login", &login_body())).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Login failed");
}

#[tokio::test]
async fn login_transport_failure_is_500() {
    let backend = Arc::new(MockBackend::new());
    backend.fail("connection refused");

    let (status, _, body) = call(&backend, json_post("/api/auth/login", &login_body())).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Internal server error");
}

#[tokio::test]
async fn login_password_too_long_never_reaches_backend() {
    let backend = Arc::new(MockBackend::new());
    let body = json!({ "usernameOrEmail": "admin", "password": "12345678901234567" });

    let (status, _, body) = call(&backend, json_post("/api/auth/login", &body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password must be at most 16 characters");
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn login_missing_identifier_rejected() {
    let backend = Arc::new(MockBackend::new());
    let (status, _, body) = call(&backend, json_post("/api/auth/login", &json!({ "password": "secret12" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email or username is required");
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn login_malformed_json_rejected() {
    let backend = Arc::new(MockBackend::new());
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, _) = call(&backend, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(backend.requests().is_empty());
}

// =============================================================================
// LOGOUT / VERIFY
// =============================================================================

#[tokio::test]
async fn logout_clears_cookie() {
    let backend = Arc::new(MockBackend::new());
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/logout")
        .header(COOKIE, session_cookie_header("jwt"))
        .body(Body::empty())
        .unwrap();

    let (status, headers, body) = call(&backend, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logout successful");
    let cookies = set_cookies(&headers);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("token="), "{}", cookies[0]);
    assert!(cookies[0].contains("Max-Age=0"), "{}", cookies[0]);
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn verify_is_static() {
    let backend = Arc::new(MockBackend::new());
    let request = Request::builder().uri("/api/auth/verify").body(Body::empty()).unwrap();
    let (status, _, body) = call(&backend, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], VERIFY_MESSAGE);
    assert!(backend.requests().is_empty());
}

// =============================================================================
// REGISTER
// =============================================================================

#[tokio::test]
async fn register_relays_with_201_and_no_cookie_needed() {
    let backend = Arc::new(MockBackend::new());
    backend.respond_json(StatusCode::OK, &json!({ "data": { "id": 9 } }));
    let body = json!({ "name": "Jo", "email": "jo@example.com", "password": "secret1" });

    let (status, _, relayed) = call(&backend, json_post("/api/admin/auth/register", &body)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(relayed, json!({ "data": { "id": 9 } }));
    let sent = &backend.requests()[0];
    assert_eq!(sent.path, vec!["admin", "auth", "register"]);
    assert_eq!(sent.bearer, None);
    assert_eq!(sent.body, ForwardBody::Json(body));
}

#[tokio::test]
async fn register_upstream_error_uses_backend_message() {
    let backend = Arc::new(MockBackend::new());
    backend.respond_json(StatusCode::CONFLICT, &json!({ "message": "Email already registered" }));

    let (status, _, body) =
        call(&backend, json_post("/api/admin/auth/register", &json!({ "email": "jo@example.com" }))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({ "message": "Email already registered" }));
}

#[tokio::test]
async fn register_transport_failure_is_500() {
    let backend = Arc::new(MockBackend::new());
    backend.fail("dns");

    let (status, _, body) = call(&backend, json_post("/api/admin/auth/register", &json!({}))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "An error occurred during registration");
}
