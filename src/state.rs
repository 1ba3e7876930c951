//! Per-service application state.
//!
//! Each binary mode owns one state struct holding its process-scoped
//! collaborators: repositories, the token verifier, the readiness check.
//! Sub-states are pulled out with [`FromRef`] so shared extractors and
//! handlers (auth, health) work against every service.

use std::sync::Arc;

use axum::extract::FromRef;

use blogmesh_auth::TokenVerifier;
use blogmesh_config::{CorsConfig, GatewayConfig, JwtConfig};

use crate::gateway::HealthAggregator;
use crate::health::ReadinessCheck;
use crate::modules::auth::repository::UserRepository;
use crate::modules::blogs::repository::BlogRepository;
use crate::modules::comments::directory::BlogDirectory;
use crate::modules::comments::repository::CommentRepository;
use crate::modules::profiles::repository::ProfileRepository;

/// Token verifier used by the [`AuthUser`](crate::middleware::auth::AuthUser)
/// extractor.
#[derive(Clone)]
pub struct Verifier(pub Arc<dyn TokenVerifier>);

impl Verifier {
    pub fn new<V: TokenVerifier + 'static>(verifier: V) -> Self {
        Self(Arc::new(verifier))
    }
}

/// Readiness check of a backing service, named after the service.
#[derive(Clone)]
pub struct Readiness {
    pub service: &'static str,
    pub check: Arc<dyn ReadinessCheck>,
}

impl Readiness {
    pub fn new<C: ReadinessCheck + 'static>(service: &'static str, check: C) -> Self {
        Self {
            service,
            check: Arc::new(check),
        }
    }
}

#[derive(Clone, FromRef)]
pub struct AuthState {
    pub users: Arc<dyn UserRepository>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub readiness: Readiness,
}

#[derive(Clone, FromRef)]
pub struct BlogState {
    pub blogs: Arc<dyn BlogRepository>,
    pub verifier: Verifier,
    pub cors_config: CorsConfig,
    pub readiness: Readiness,
}

#[derive(Clone, FromRef)]
pub struct CommentState {
    pub comments: Arc<dyn CommentRepository>,
    pub blog_directory: Arc<dyn BlogDirectory>,
    pub verifier: Verifier,
    pub cors_config: CorsConfig,
    pub readiness: Readiness,
}

#[derive(Clone, FromRef)]
pub struct ProfileState {
    pub profiles: Arc<dyn ProfileRepository>,
    pub verifier: Verifier,
    pub cors_config: CorsConfig,
    pub readiness: Readiness,
}

#[derive(Clone, FromRef)]
pub struct GatewayState {
    pub config: Arc<GatewayConfig>,
    pub client: reqwest::Client,
    pub health: HealthAggregator,
    pub cors_config: CorsConfig,
}
