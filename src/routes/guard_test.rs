use super::*;

#[test]
fn protected_paths() {
    for path in ["/", "/users", "/users/", "/users/42", "/blogs", "/blogs/new", "/blogs/my-post/edit"] {
        assert!(is_protected_path(path), "expected {path:?} to be protected");
    }
}

#[test]
fn unprotected_paths() {
    for path in ["/login", "/register", "/usersx", "/blogsearch", "/api/blogs", "/api/admin/users", "/healthz", "/assets/app.js"] {
        assert!(!is_protected_path(path), "expected {path:?} to be unprotected");
    }
}

#[test]
fn protected_without_session_redirects_to_login() {
    assert_eq!(decide("/", false), GuardDecision::RedirectToLogin);
    assert_eq!(decide("/blogs/new", false), GuardDecision::RedirectToLogin);
    assert_eq!(decide("/users", false), GuardDecision::RedirectToLogin);
}

#[test]
fn protected_with_session_passes() {
    assert_eq!(decide("/", true), GuardDecision::PassThrough);
    assert_eq!(decide("/users/7", true), GuardDecision::PassThrough);
}

#[test]
fn auth_pages_with_session_redirect_home() {
    assert_eq!(decide("/login", true), GuardDecision::RedirectToHome);
    assert_eq!(decide("/register", true), GuardDecision::RedirectToHome);
}

#[test]
fn auth_pages_without_session_pass() {
    assert_eq!(decide("/login", false), GuardDecision::PassThrough);
    assert_eq!(decide("/register", false), GuardDecision::PassThrough);
}

#[test]
fn auth_page_subpaths_are_not_auth_pages() {
    assert!(!is_auth_path("/login/help"));
    assert_eq!(decide("/login/help", true), GuardDecision::PassThrough);
}

#[test]
fn api_paths_always_pass() {
    for has_session in [false, true] {
        assert_eq!(decide("/api/blogs", has_session), GuardDecision::PassThrough);
        assert_eq!(decide("/api/auth/login", has_session), GuardDecision::PassThrough);
    }
}
