//! JWT utilities for the token issuer.
//!
//! Only the auth service signs or decodes tokens. Every other service treats
//! the token as opaque and asks the auth service to verify it (see
//! [`crate::verifier`]).
//!
//! # Example
//!
//! ```ignore
//! use blogmesh_auth::{create_access_token, verify_token};
//! use blogmesh_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "alice", &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use blogmesh_config::JwtConfig;
use blogmesh_core::AppError;

use crate::claims::Claims;

/// Creates a signed access token bound to `user_id`.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(
    user_id: Uuid,
    username: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_expiry as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal_error(format!("Failed to create token: {}", e)))
}

/// Verifies signature and expiry and returns the embedded claims.
///
/// Depends only on the token, the current time, and the secret.
///
/// # Errors
///
/// Returns an unauthorized error if the token is malformed, expired, or
/// signed with a different secret.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthenticated())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_test_jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key-at-least-32-characters-long".to_string(),
            access_token_expiry: 3600,
        }
    }

    #[test]
    fn test_create_access_token_success() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), "alice", &config).unwrap();
        assert!(!token.is_empty());
    }

    #[test]
    fn test_verify_token_success() {
        let config = get_test_jwt_config();
        let user_id = Uuid::new_v4();

        let token = create_access_token(user_id, "alice", &config).unwrap();
        let claims = verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.exp, claims.iat + 3600);
    }

    #[test]
    fn test_verify_token_twice_is_stable() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), "alice", &config).unwrap();

        let first = verify_token(&token, &config).unwrap();
        let second = verify_token(&token, &config).unwrap();
        assert_eq!(first.sub, second.sub);
        assert_eq!(first.username, second.username);
    }

    #[test]
    fn test_verify_token_invalid() {
        let config = get_test_jwt_config();
        let result = verify_token("invalid-token", &config);
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let config = get_test_jwt_config();
        let token = create_access_token(Uuid::new_v4(), "alice", &config).unwrap();

        let wrong_config = JwtConfig {
            secret: "different-secret-key-at-least-32-characters".to_string(),
            access_token_expiry: 3600,
        };

        assert!(verify_token(&token, &wrong_config).is_err());
    }

    #[test]
    fn test_verify_token_expired() {
        let config = get_test_jwt_config();
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            username: "alice".to_string(),
            exp: now - 600,
            iat: now - 4200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let err = verify_token(&token, &config).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
