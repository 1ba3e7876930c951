//! Request forwarding to backing services.

use std::time::{Duration, Instant};

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, HeaderName, StatusCode, header},
    response::Response,
};
use tracing::{debug, warn};

use blogmesh_config::ServiceEndpoint;
use blogmesh_core::AppError;
use blogmesh_observability::{track_upstream_duration, track_upstream_failure};

use crate::state::GatewayState;

/// Largest request body the gateway buffers before forwarding.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    HeaderName::from_static("keep-alive"),
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Client used for forwarding. Redirects are relayed to the caller, never
/// followed.
pub fn proxy_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

fn strip_headers(headers: &HeaderMap, extra: &[HeaderName]) -> HeaderMap {
    let mut out = headers.clone();
    for name in HOP_BY_HOP.iter().chain(extra) {
        out.remove(name);
    }
    out
}

/// Fallback handler: forwards anything under a routed prefix, 404 otherwise.
pub async fn proxy(State(state): State<GatewayState>, request: Request) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();

    let Some(rule) = state.config.route_for(&path) else {
        debug!(path = %path, "No route for path");
        return Err(AppError::not_found(anyhow::anyhow!("Route not found")));
    };

    forward(&state.client, &rule.service, request, state.config.proxy_timeout).await
}

/// Forwards `request` to `service` unchanged apart from `host` and
/// hop-by-hop headers, and relays the response.
///
/// Transport failure or timeout becomes a 502. No retry.
pub async fn forward(
    client: &reqwest::Client,
    service: &ServiceEndpoint,
    request: Request,
    timeout: Duration,
) -> Result<Response, AppError> {
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let target_url = service.url(&path_and_query);

    let (parts, body) = request.into_parts();
    let body = to_bytes(body, MAX_BODY_BYTES).await.map_err(|e| {
        AppError::new(
            StatusCode::PAYLOAD_TOO_LARGE,
            anyhow::anyhow!("Request body too large: {}", e),
        )
    })?;

    let headers = strip_headers(&parts.headers, &[header::HOST, header::CONTENT_LENGTH]);

    let start = Instant::now();
    let result = client
        .request(parts.method.clone(), &target_url)
        .headers(headers)
        .body(body)
        .timeout(timeout)
        .send()
        .await;

    let upstream = match result {
        Ok(upstream) => upstream,
        Err(e) => {
            track_upstream_failure(&service.name);
            warn!(
                service = %service.name,
                method = %parts.method,
                url = %target_url,
                timeout = e.is_timeout(),
                error = %e,
                "Upstream request failed"
            );
            return Err(AppError::bad_gateway(e));
        }
    };

    let status = upstream.status();
    let response_headers = strip_headers(upstream.headers(), &[header::CONTENT_LENGTH]);

    let bytes = upstream.bytes().await.map_err(|e| {
        track_upstream_failure(&service.name);
        warn!(service = %service.name, error = %e, "Failed to read upstream body");
        AppError::bad_gateway(e)
    })?;
    track_upstream_duration(&service.name, start.elapsed().as_secs_f64());

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;

    Ok(response)
}
