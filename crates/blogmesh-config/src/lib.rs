//! # blogmesh Config
//!
//! Configuration types for the blogmesh services, loaded from environment
//! variables:
//!
//! - [`jwt`]: token signing secret and lifetime (auth service)
//! - [`cors`]: allowed origins
//! - [`server`]: listen host and port
//! - [`services`]: backing service URLs
//! - [`auth_client`]: verify-call settings used by resource services
//! - [`gateway`]: route table and timeouts for the edge gateway
//!
//! # Example
//!
//! ```ignore
//! use blogmesh_config::{AuthClientConfig, ServerConfig};
//!
//! let server = ServerConfig::from_env(3002);
//! let auth_client = AuthClientConfig::from_env();
//! ```

pub mod auth_client;
pub mod cors;
pub mod gateway;
pub mod jwt;
pub mod server;
pub mod services;

// Re-export commonly used types at crate root
pub use auth_client::AuthClientConfig;
pub use cors::CorsConfig;
pub use gateway::{GatewayConfig, RouteRule};
pub use jwt::JwtConfig;
pub use server::ServerConfig;
pub use services::{ServiceEndpoint, ServiceUrls, peer_timeout_from_env};
