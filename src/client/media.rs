//! Image URL resolution against the CDN.
//!
//! The backend stores cover images as CDN-relative paths. A missing or
//! placeholder CDN base degrades to `None`, which the console renders as
//! "No Image".

use reqwest::Url;

use crate::models::Blog;

pub const NO_IMAGE: &str = "No Image";

fn usable_path(path: Option<&str>) -> Option<&str> {
    path.map(str::trim)
        .filter(|v| !v.is_empty() && !v.contains("undefined"))
}

fn usable_cdn(cdn_base: Option<&str>) -> Option<&str> {
    cdn_base
        .map(str::trim)
        .filter(|v| !v.is_empty() && *v != "undefined")
}

/// Resolve an image path to an absolute URL.
///
/// Absolute URLs pass through; relative paths are prefixed with `cdn_base`
/// and must then parse as a URL.
#[must_use]
pub fn resolve_image_url(path: Option<&str>, cdn_base: Option<&str>) -> Option<String> {
    let path = usable_path(path)?;
    if Url::parse(path).is_ok() {
        return Some(path.to_owned());
    }
    let cdn_base = usable_cdn(cdn_base)?;
    let full = format!("{cdn_base}{path}");
    Url::parse(&full).ok().map(|_| full)
}

/// Display URL for a blog's cover, if one resolves.
#[must_use]
pub fn blog_image_url(blog: &Blog, cdn_base: Option<&str>) -> Option<String> {
    resolve_image_url(blog.image_path(), cdn_base)
}

/// Label shown in place of a cover: the URL, or [`NO_IMAGE`].
#[must_use]
pub fn image_label(blog: &Blog, cdn_base: Option<&str>) -> String {
    blog_image_url(blog, cdn_base).unwrap_or_else(|| NO_IMAGE.to_owned())
}

#[cfg(test)]
#[path = "media_test.rs"]
mod tests;
