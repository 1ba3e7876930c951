use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use tracing::{debug, warn};

use blogmesh_auth::VerifyError;
use blogmesh_core::{AppError, Identity};
use blogmesh_observability::track_auth_verification;

use crate::state::Verifier;

/// Extractor that verifies the bearer token with the auth service and
/// provides the caller's identity.
///
/// Every failure is answered with the same 401 body. The cause is only
/// visible in logs and in the `auth_verifications_total` metric.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl AuthUser {
    pub fn id(&self) -> uuid::Uuid {
        self.0.id
    }

    pub fn username(&self) -> &str {
        &self.0.username
    }
}

/// Returns the token of a `Bearer <token>` header value.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for AuthUser
where
    Verifier: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            track_auth_verification(VerifyError::MissingToken.outcome());
            debug!("Request without bearer token");
            return Err(AppError::unauthenticated());
        };

        let Verifier(verifier) = Verifier::from_ref(state);

        match verifier.verify(token).await {
            Ok(identity) => {
                track_auth_verification("success");
                Ok(AuthUser(identity))
            }
            Err(err) => {
                track_auth_verification(err.outcome());
                match err {
                    VerifyError::Timeout | VerifyError::Transport(_) => {
                        warn!(error = %err, "Token verification unavailable")
                    }
                    _ => debug!(error = %err, "Token verification failed"),
                }
                Err(AppError::unauthenticated())
            }
        }
    }
}
