//! Gateway configuration: route table, proxy timeout, readiness probes.
//!
//! # Environment Variables
//!
//! - `GATEWAY_PROXY_TIMEOUT_MS`: bound on a forwarded request (default: 30000)
//! - `GATEWAY_PROBE_TIMEOUT_MS`: bound on each readiness probe (default: 2000)
//! - service URLs, see [`crate::services`]

use std::env;
use std::time::Duration;

use crate::services::{ServiceEndpoint, ServiceUrls};

/// Maps a path prefix to the service that owns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRule {
    pub prefix: String,
    pub service: ServiceEndpoint,
}

impl RouteRule {
    /// Segment-aware prefix match: `/api/blogs` matches `/api/blogs` and
    /// `/api/blogs/x`, not `/api/blogsx`.
    pub fn matches(&self, path: &str) -> bool {
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Backing services in probe/report order.
    pub services: Vec<ServiceEndpoint>,
    pub routes: Vec<RouteRule>,
    pub proxy_timeout: Duration,
    pub probe_timeout: Duration,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let proxy_timeout = millis_var("GATEWAY_PROXY_TIMEOUT_MS", 30_000);
        let probe_timeout = millis_var("GATEWAY_PROBE_TIMEOUT_MS", 2_000);
        Self::from_urls(ServiceUrls::from_env(), proxy_timeout, probe_timeout)
    }

    pub fn from_urls(urls: ServiceUrls, proxy_timeout: Duration, probe_timeout: Duration) -> Self {
        let auth = ServiceEndpoint::new("auth-service", urls.auth);
        let blog = ServiceEndpoint::new("blog-service", urls.blog);
        let comment = ServiceEndpoint::new("comment-service", urls.comment);
        let profile = ServiceEndpoint::new("profile-service", urls.profile);

        let routes = vec![
            RouteRule {
                prefix: "/api/auth".to_string(),
                service: auth.clone(),
            },
            RouteRule {
                prefix: "/api/blogs".to_string(),
                service: blog.clone(),
            },
            RouteRule {
                prefix: "/api/comments".to_string(),
                service: comment.clone(),
            },
            RouteRule {
                prefix: "/api/profiles".to_string(),
                service: profile.clone(),
            },
        ];

        Self {
            services: vec![auth, blog, comment, profile],
            routes,
            proxy_timeout,
            probe_timeout,
        }
    }
}

impl GatewayConfig {
    /// First route, in table order, whose prefix matches `path`.
    pub fn route_for(&self, path: &str) -> Option<&RouteRule> {
        self.routes.iter().find(|rule| rule.matches(path))
    }
}

fn millis_var(key: &str, default: u64) -> Duration {
    Duration::from_millis(
        env::var(key)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(default),
    )
}
