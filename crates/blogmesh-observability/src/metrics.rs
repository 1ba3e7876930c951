use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use tracing::warn;

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// Check if observability is enabled via OBSERVABILITY_ENABLED env var
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true)
    })
}

/// Initialize Prometheus metrics exporter with upkeep task.
/// Returns None if observability is disabled or the recorder cannot be installed.
pub fn init_metrics() -> Option<PrometheusHandle> {
    if !is_observability_enabled() {
        return None;
    }

    let builder = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5,
                10.0,
            ],
        )
        .and_then(|b| {
            b.set_buckets_for_metric(
                Matcher::Full("gateway_upstream_duration_seconds".to_string()),
                &[0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0],
            )
        });

    let handle = match builder.and_then(|b| b.install_recorder()) {
        Ok(handle) => handle,
        Err(e) => {
            warn!(error = %e, "Failed to install Prometheus recorder, metrics disabled");
            return None;
        }
    };

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Some(handle)
}

/// Metrics middleware to track HTTP requests
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let uri_path = req.uri().path().to_owned();

    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or(uri_path);

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path).record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

/// `GET /metrics` rendering the Prometheus text format.
pub fn metrics_route<S>(handle: PrometheusHandle) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

// Business metrics helpers

/// Outcome of a remote token verification (`success`, `rejected`, `timeout`, ...).
pub fn track_auth_verification(outcome: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("auth_verifications_total", "outcome" => outcome.to_string()).increment(1);
}

/// Gateway could not reach `service` while forwarding a request.
pub fn track_upstream_failure(service: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("gateway_upstream_failures_total", "service" => service.to_string()).increment(1);
}

pub fn track_upstream_duration(service: &str, duration_secs: f64) {
    if !is_observability_enabled() {
        return;
    }
    histogram!("gateway_upstream_duration_seconds", "service" => service.to_string())
        .record(duration_secs);
}

pub fn track_readiness_check(status: &str) {
    if !is_observability_enabled() {
        return;
    }
    counter!("gateway_readiness_checks_total", "status" => status.to_string()).increment(1);
}

pub fn track_user_registered() {
    if !is_observability_enabled() {
        return;
    }
    counter!("users_registered_total").increment(1);
}

pub fn track_login(success: bool) {
    if !is_observability_enabled() {
        return;
    }
    let status = if success { "success" } else { "failure" };
    counter!("user_logins_total", "status" => status).increment(1);
}

pub fn track_token_issued() {
    if !is_observability_enabled() {
        return;
    }
    counter!("jwt_tokens_issued_total").increment(1);
}
