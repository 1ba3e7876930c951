//! # blogmesh Auth
//!
//! Token handling for blogmesh.
//!
//! - [`claims`]: JWT claim structure
//! - [`jwt`]: token issuing and local verification (auth service only)
//! - [`verifier`]: the [`TokenVerifier`] interface and the HTTP client every
//!   resource service uses to call the auth service
//!
//! # Example
//!
//! ```ignore
//! use blogmesh_auth::{RemoteTokenVerifier, TokenVerifier};
//! use blogmesh_config::AuthClientConfig;
//!
//! let verifier = RemoteTokenVerifier::new(&AuthClientConfig::from_env())?;
//! let identity = verifier.verify(token).await?;
//! ```

pub mod claims;
pub mod jwt;
pub mod verifier;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
pub use verifier::{
    RemoteTokenVerifier, TokenVerifier, VERIFY_PATH, VerifiedUser, VerifyError, VerifyResponse,
};
