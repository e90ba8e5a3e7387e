//! Form schemas checked before anything reaches the network.
//!
//! The login check runs in two places: the client services apply the full
//! form rules, the gateway's login handler applies the credential bounds
//! only (see [`LoginForm::validate_credentials`]).

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::BlogDraft;

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("EMAIL_REGEX: invalid regex pattern"));

static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("SLUG_REGEX: invalid regex pattern"));

pub const PASSWORD_MIN_LEN: usize = 6;
/// Upper bound enforced on login only; registration has no maximum.
pub const LOGIN_PASSWORD_MAX_LEN: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

// =============================================================================
// LOGIN
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginForm {
    pub username_or_email: String,
    pub password: String,
}

impl LoginForm {
    /// Credential bounds shared with the gateway.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule.
    pub fn validate_credentials(&self) -> Result<(), ValidationError> {
        if self.username_or_email.is_empty() {
            return Err(ValidationError::new("usernameOrEmail", "Email or username is required"));
        }
        let len = char_len(&self.password);
        if len < PASSWORD_MIN_LEN {
            return Err(ValidationError::new("password", "Password must be at least 6 characters"));
        }
        if len > LOGIN_PASSWORD_MAX_LEN {
            return Err(ValidationError::new("password", "Password must be at most 16 characters"));
        }
        Ok(())
    }

    /// Full login form rules: credential bounds plus an email or a username
    /// of at least 3 characters.
    ///
    /// # Errors
    ///
    /// Returns the first failing rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_credentials()?;
        let value = &self.username_or_email;
        if !EMAIL_REGEX.is_match(value) && char_len(value) < 3 {
            return Err(ValidationError::new("usernameOrEmail", "Please enter a valid email or username"));
        }
        Ok(())
    }
}

// =============================================================================
// REGISTER
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Registration payload; the confirmation never leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterPayload {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    /// # Errors
    ///
    /// Returns the first failing rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if char_len(&self.name) < 2 {
            return Err(ValidationError::new("name", "Name must be at least 2 characters"));
        }
        if !EMAIL_REGEX.is_match(&self.email) {
            return Err(ValidationError::new("email", "Please enter a valid email address"));
        }
        if char_len(&self.password) < PASSWORD_MIN_LEN {
            return Err(ValidationError::new("password", "Password must be at least 6 characters"));
        }
        if char_len(&self.confirm_password) < PASSWORD_MIN_LEN {
            return Err(ValidationError::new("confirmPassword", "Please confirm your password"));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::new("confirmPassword", "Passwords don't match"));
        }
        Ok(())
    }

    #[must_use]
    pub fn payload(&self) -> RegisterPayload {
        RegisterPayload { name: self.name.clone(), email: self.email.clone(), password: self.password.clone() }
    }
}

// =============================================================================
// BLOG
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogForm {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub cover_image_url: String,
    pub excerpt: String,
    pub meta_title: String,
    pub meta_description: String,
}

impl BlogForm {
    /// # Errors
    ///
    /// Returns the first failing rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::new("title", "Title is required"));
        }
        if self.slug.is_empty() {
            return Err(ValidationError::new("slug", "Slug is required"));
        }
        if !SLUG_REGEX.is_match(&self.slug) {
            return Err(ValidationError::new(
                "slug",
                "Slug must contain only lowercase letters, numbers, and hyphens",
            ));
        }
        if self.content.is_empty() {
            return Err(ValidationError::new("content", "Content is required"));
        }
        Ok(())
    }

    /// Fill an empty slug from the title.
    pub fn autofill_slug(&mut self) {
        if self.slug.is_empty() {
            self.slug = slugify(&self.title);
        }
    }

    /// Draft sent in the `data` part. With a cover file attached the URL
    /// field is dropped in favor of the upload.
    #[must_use]
    pub fn draft(&self, has_cover_file: bool) -> BlogDraft {
        BlogDraft {
            title: self.title.clone(),
            slug: self.slug.clone(),
            content: self.content.clone(),
            excerpt: optional(&self.excerpt),
            meta_title: optional(&self.meta_title),
            meta_description: optional(&self.meta_description),
            cover_image_url: if has_cover_file { None } else { optional(&self.cover_image_url) },
        }
    }
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() { None } else { Some(value.to_owned()) }
}

/// Lowercase, collapse every run of non `[a-z0-9]` into `-`, trim dashes.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }
    slug
}

#[cfg(test)]
#[path = "forms_test.rs"]
mod tests;
