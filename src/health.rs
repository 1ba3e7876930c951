//! Liveness and readiness endpoints of the backing services.

use async_trait::async_trait;
use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum::extract::FromRef;
use tracing::warn;

use blogmesh_db::PgPool;
use blogmesh_models::health::{HealthStatus, LivenessResponse, ReadinessResponse};

use crate::state::Readiness;

/// Whether the service's store can currently serve traffic.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    async fn is_ready(&self) -> bool;
}

/// Pings PostgreSQL with `SELECT 1`.
#[derive(Clone, Debug)]
pub struct PgReadiness {
    db: PgPool,
}

impl PgReadiness {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReadinessCheck for PgReadiness {
    async fn is_ready(&self) -> bool {
        match blogmesh_db::ping(&self.db).await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Database ping failed");
                false
            }
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is up", body = LivenessResponse)),
    tag = "Health"
)]
pub async fn health(State(readiness): State<Readiness>) -> Json<LivenessResponse> {
    Json(LivenessResponse {
        status: HealthStatus::Ok,
        service: readiness.service.to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/ready",
    responses(
        (status = 200, description = "Store reachable", body = ReadinessResponse),
        (status = 503, description = "Store unreachable", body = ReadinessResponse)
    ),
    tag = "Health"
)]
pub async fn ready(State(readiness): State<Readiness>) -> (StatusCode, Json<ReadinessResponse>) {
    let database_ready = readiness.check.is_ready().await;
    let body = ReadinessResponse::new(readiness.service, database_ready);
    let status = if database_ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(body))
}

pub fn init_health_router<S>() -> Router<S>
where
    Readiness: FromRef<S>,
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}
