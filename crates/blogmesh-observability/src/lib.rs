//! Blogmesh observability.
//!
//! Structured logging through `tracing` and Prometheus metrics through the
//! `metrics` facade. Every service binary installs both at startup; metrics
//! can be switched off at runtime with `OBSERVABILITY_ENABLED=false`.
//!
//! # Examples
//!
//! ```no_run
//! use blogmesh_observability::{init_metrics, init_tracing};
//!
//! #[tokio::main]
//! async fn main() {
//!     let _guard = init_tracing("blog-service");
//!     let _handle = init_metrics();
//!     // ... application code ...
//! }
//! ```

pub mod logging;
pub mod metrics;

pub use metrics_exporter_prometheus::PrometheusHandle;

pub use logging::{REQUEST_ID_HEADER, init_tracing, logging_middleware};
pub use metrics::{
    init_metrics, is_observability_enabled, metrics_middleware, metrics_route,
    track_auth_verification, track_login, track_readiness_check, track_token_issued,
    track_upstream_duration, track_upstream_failure, track_user_registered,
};
