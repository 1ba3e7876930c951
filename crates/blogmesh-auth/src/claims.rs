//! JWT claim structure for bearer tokens.

use serde::{Deserialize, Serialize};

/// Claims embedded in every access token.
///
/// # Fields
///
/// - `sub`: User ID (subject)
/// - `username`: Username at issuance
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// Username at issuance
    pub username: String,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
