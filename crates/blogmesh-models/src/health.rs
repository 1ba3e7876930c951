//! Health and readiness payloads shared by every service and the gateway.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Ok,
    Error,
}

impl HealthStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, HealthStatus::Ok)
    }
}

/// Liveness answer. Always OK while the process is serving.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LivenessResponse {
    pub status: HealthStatus,
    pub service: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseState {
    Connected,
    Disconnected,
}

/// Readiness of a single backing service.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub service: String,
    pub database: DatabaseState,
}

impl ReadinessResponse {
    pub fn new(service: &str, database_ready: bool) -> Self {
        let (status, database) = if database_ready {
            (HealthStatus::Ok, DatabaseState::Connected)
        } else {
            (HealthStatus::Error, DatabaseState::Disconnected)
        };
        Self {
            status,
            service: service.to_string(),
            database,
        }
    }
}

/// Probe result for one dependency of the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ServiceHealth {
    pub name: String,
    pub status: HealthStatus,
}

/// Combined readiness of the gateway's dependencies, in configured order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AggregatedHealth {
    pub status: HealthStatus,
    pub service: String,
    pub dependencies: Vec<ServiceHealth>,
}

impl AggregatedHealth {
    /// OK only when every dependency is OK.
    pub fn from_dependencies(service: &str, dependencies: Vec<ServiceHealth>) -> Self {
        let status = if dependencies.iter().all(|d| d.status.is_ok()) {
            HealthStatus::Ok
        } else {
            HealthStatus::Error
        };
        Self {
            status,
            service: service.to_string(),
            dependencies,
        }
    }
}
