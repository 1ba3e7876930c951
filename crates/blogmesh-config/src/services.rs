//! Addresses of the backing services.
//!
//! # Environment Variables
//!
//! - `AUTH_SERVICE_URL` (default: `http://localhost:3001`)
//! - `BLOG_SERVICE_URL` (default: `http://localhost:3002`)
//! - `COMMENT_SERVICE_URL` (default: `http://localhost:3003`)
//! - `PROFILE_SERVICE_URL` (default: `http://localhost:3004`)
//! - `PEER_TIMEOUT_MS`: bound on lookups between services (default: 3000)

use std::env;
use std::time::Duration;

/// A named backing service and its base URL (no trailing slash).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceEndpoint {
    pub name: String,
    pub base_url: String,
}

impl ServiceEndpoint {
    pub fn new(name: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            name: name.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceUrls {
    pub auth: String,
    pub blog: String,
    pub comment: String,
    pub profile: String,
}

impl ServiceUrls {
    pub fn from_env() -> Self {
        Self {
            auth: url_var("AUTH_SERVICE_URL", "http://localhost:3001"),
            blog: url_var("BLOG_SERVICE_URL", "http://localhost:3002"),
            comment: url_var("COMMENT_SERVICE_URL", "http://localhost:3003"),
            profile: url_var("PROFILE_SERVICE_URL", "http://localhost:3004"),
        }
    }
}

/// Timeout for direct calls from one backing service to another, such as
/// the comment service checking that a blog exists.
pub fn peer_timeout_from_env() -> Duration {
    Duration::from_millis(
        env::var("PEER_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000),
    )
}

fn url_var(key: &str, default: &str) -> String {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .trim_end_matches('/')
        .to_string()
}
