//! Remote token verification.
//!
//! Resource services never decode tokens themselves. They call
//! `POST {AUTH_SERVICE_URL}/api/auth/verify` with the caller's bearer token
//! and trust the identity the auth service returns. The call is fallible
//! I/O with its own timeout; every failure mode is reported as a
//! [`VerifyError`] so the caller can log the cause while still answering 401.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use blogmesh_config::AuthClientConfig;
use blogmesh_core::Identity;

/// Path of the verify endpoint on the auth service.
pub const VERIFY_PATH: &str = "/api/auth/verify";

/// Why a token could not be turned into an [`Identity`].
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("no bearer token presented")]
    MissingToken,
    #[error("auth service rejected the token with status {0}")]
    Rejected(u16),
    #[error("auth service response carried no user")]
    NoUser,
    #[error("auth service did not answer within the timeout")]
    Timeout,
    #[error("auth service unreachable: {0}")]
    Transport(String),
    #[error("auth service returned a malformed body: {0}")]
    MalformedResponse(String),
}

impl VerifyError {
    /// Label used for the `auth_verifications_total` metric.
    pub fn outcome(&self) -> &'static str {
        match self {
            VerifyError::MissingToken => "missing_token",
            VerifyError::Rejected(_) | VerifyError::NoUser => "rejected",
            VerifyError::Timeout => "timeout",
            VerifyError::Transport(_) => "transport_error",
            VerifyError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// User object returned by the verify endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifiedUser {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Body of a verify response. A missing `user` means the token is invalid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub user: Option<VerifiedUser>,
}

impl From<VerifiedUser> for Identity {
    fn from(user: VerifiedUser) -> Self {
        Identity::new(user.id, user.username)
    }
}

/// Turns a bearer token into the identity it was issued for.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError>;
}

/// [`TokenVerifier`] that calls the auth service over HTTP.
#[derive(Clone, Debug)]
pub struct RemoteTokenVerifier {
    client: reqwest::Client,
    verify_url: String,
}

impl RemoteTokenVerifier {
    pub fn new(config: &AuthClientConfig) -> Result<Self, reqwest::Error> {
        Self::with_timeout(&config.auth_service_url, config.verify_timeout)
    }

    pub fn with_timeout(auth_service_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_max_idle_per_host(10)
            .build()?;

        Ok(Self {
            client,
            verify_url: format!("{}{}", auth_service_url.trim_end_matches('/'), VERIFY_PATH),
        })
    }
}

#[async_trait]
impl TokenVerifier for RemoteTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Identity, VerifyError> {
        if token.is_empty() {
            return Err(VerifyError::MissingToken);
        }

        let response = self
            .client
            .post(&self.verify_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            debug!(status = %status.as_u16(), "Auth service rejected token");
            return Err(VerifyError::Rejected(status.as_u16()));
        }

        let body: VerifyResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                VerifyError::Timeout
            } else {
                VerifyError::MalformedResponse(e.to_string())
            }
        })?;

        body.user.map(Identity::from).ok_or(VerifyError::NoUser)
    }
}

fn transport_error(err: reqwest::Error) -> VerifyError {
    if err.is_timeout() {
        VerifyError::Timeout
    } else {
        VerifyError::Transport(err.to_string())
    }
}
