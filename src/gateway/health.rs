//! Aggregated readiness of the backing services.
//!
//! Every configured service is probed concurrently with `GET /ready`, each
//! probe under its own timeout. All probes are awaited; a failed probe only
//! marks its own entry `ERROR`. Results keep the configured service order.

use std::sync::Arc;
use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use futures::future::join_all;
use serde::Deserialize;
use tracing::{instrument, warn};

use blogmesh_config::{GatewayConfig, ServiceEndpoint};
use blogmesh_models::health::{AggregatedHealth, HealthStatus, LivenessResponse, ServiceHealth};
use blogmesh_observability::track_readiness_check;

pub const GATEWAY_SERVICE_NAME: &str = "api-gateway";

const READY_PATH: &str = "/ready";

#[derive(Debug, thiserror::Error)]
enum ProbeError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed body: {0}")]
    Body(String),
}

#[derive(Debug, Deserialize)]
struct ProbeBody {
    status: String,
}

#[derive(Clone, Debug)]
pub struct HealthAggregator {
    client: reqwest::Client,
    services: Arc<Vec<ServiceEndpoint>>,
    probe_timeout: Duration,
}

impl HealthAggregator {
    pub fn new(
        services: Vec<ServiceEndpoint>,
        probe_timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(probe_timeout)
            .connect_timeout(probe_timeout)
            .build()?;

        Ok(Self {
            client,
            services: Arc::new(services),
            probe_timeout,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        Self::new(config.services.clone(), config.probe_timeout)
    }

    /// Probes every service and merges the results.
    pub async fn check_readiness(&self) -> AggregatedHealth {
        let probes = self.services.iter().map(|service| self.probe(service));
        let dependencies = join_all(probes).await;
        AggregatedHealth::from_dependencies(GATEWAY_SERVICE_NAME, dependencies)
    }

    async fn probe(&self, service: &ServiceEndpoint) -> ServiceHealth {
        let outcome = match tokio::time::timeout(self.probe_timeout, self.fetch_status(service)).await
        {
            Ok(result) => result,
            Err(_) => Err(ProbeError::Timeout(self.probe_timeout)),
        };

        let status = outcome.unwrap_or_else(|e| {
            warn!(service = %service.name, error = %e, "Readiness probe failed");
            HealthStatus::Error
        });

        ServiceHealth {
            name: service.name.clone(),
            status,
        }
    }

    async fn fetch_status(&self, service: &ServiceEndpoint) -> Result<HealthStatus, ProbeError> {
        let response = self
            .client
            .get(service.url(READY_PATH))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ProbeError::Timeout(self.probe_timeout)
                } else {
                    ProbeError::Transport(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status(status.as_u16()));
        }

        let body: ProbeBody = response
            .json()
            .await
            .map_err(|e| ProbeError::Body(e.to_string()))?;

        match body.status.as_str() {
            "OK" | "ok" => Ok(HealthStatus::Ok),
            other => {
                warn!(service = %service.name, status = %other, "Service reported not ready");
                Ok(HealthStatus::Error)
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Gateway is up", body = LivenessResponse)),
    tag = "Gateway"
)]
pub async fn gateway_health() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: HealthStatus::Ok,
        service: GATEWAY_SERVICE_NAME.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "All backing services ready", body = AggregatedHealth),
        (status = 503, description = "At least one backing service not ready", body = AggregatedHealth)
    ),
    tag = "Gateway"
)]
#[instrument(skip(aggregator))]
pub async fn gateway_ready(
    State(aggregator): State<HealthAggregator>,
) -> (StatusCode, Json<AggregatedHealth>) {
    let health = aggregator.check_readiness().await;

    let (status_code, label) = if health.status.is_ok() {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "error")
    };
    track_readiness_check(label);

    (status_code, Json(health))
}
