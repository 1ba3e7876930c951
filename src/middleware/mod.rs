//! Request extractors for cross-cutting concerns.
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. [`AuthUser`](auth::AuthUser) asks the auth service to verify the token
//! 3. The resolved [`Identity`](blogmesh_core::Identity) is handed to the handler
//! 4. The handler applies the ownership rule before any mutation
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::auth::AuthUser;
//!
//! async fn delete_blog(AuthUser(caller): AuthUser, Path(id): Path<Uuid>) -> ... {
//!     // caller.id is the verified identity
//! }
//! ```

pub mod auth;
