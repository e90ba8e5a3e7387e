//! Gateway configuration parsed from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! `main` loads this once at startup; the parsed value is shared read-only
//! through `AppState`. Parsing goes through a lookup closure so tests never
//! touch the process environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_STATIC_DIR: &str = "public";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required env var {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the backend API; resource paths are appended to it.
    pub backend_base_url: String,
    /// CDN prefix for relative image paths. `None` when unset or blank.
    pub cdn_base_url: Option<String>,
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Whether the session cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
    pub static_dir: PathBuf,
    pub connect_timeout_secs: u64,
    pub max_body_bytes: usize,
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Required:
    /// - `BACKEND_BASE_URL`
    ///
    /// Optional:
    /// - `CDN_BASE_URL`
    /// - `BIND_ADDR`: IP literal, default `0.0.0.0`
    /// - `PORT`: default 3000
    /// - `APP_ENV`: `production` enables secure cookies
    /// - `COOKIE_SECURE`: overrides the `APP_ENV` inference
    /// - `STATIC_DIR`: default `public`
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    /// - `MAX_BODY_BYTES`: default 10 MiB
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_base_url = non_blank(lookup("BACKEND_BASE_URL")).ok_or(ConfigError::Missing("BACKEND_BASE_URL"))?;
        let cdn_base_url = non_blank(lookup("CDN_BASE_URL")).filter(|v| v != "undefined");

        let production = lookup("APP_ENV")
            .map(|v| v.trim().eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        let cookie_secure = match lookup("COOKIE_SECURE") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid { key: "COOKIE_SECURE", value: raw })?,
            None => production,
        };

        Ok(Self {
            backend_base_url,
            cdn_base_url,
            bind_addr: parse_or(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?,
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            cookie_secure,
            static_dir: non_blank(lookup("STATIC_DIR"))
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
            connect_timeout_secs: parse_or(&lookup, "BACKEND_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", DEFAULT_MAX_BODY_BYTES)?,
        })
    }

    /// Socket address for the listener.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

pub(crate) fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match non_blank(lookup(key)) {
        Some(raw) => raw.parse::<T>().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
