//! Settings for calling the auth service's verify endpoint.

use std::env;
use std::time::Duration;

use crate::services::ServiceUrls;

#[derive(Clone, Debug)]
pub struct AuthClientConfig {
    pub auth_service_url: String,
    /// Upper bound on one verify round-trip.
    pub verify_timeout: Duration,
}

impl AuthClientConfig {
    pub fn from_env() -> Self {
        Self {
            auth_service_url: ServiceUrls::from_env().auth,
            verify_timeout: Duration::from_millis(
                env::var("AUTH_VERIFY_TIMEOUT_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3000),
            ),
        }
    }
}
