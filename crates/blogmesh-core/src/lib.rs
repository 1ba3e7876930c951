//! # blogmesh Core
//!
//! Core types shared by every blogmesh service:
//!
//! - [`errors`]: [`AppError`] with HTTP response conversion
//! - [`identity`]: the [`Identity`] resolved from a bearer token
//! - [`ownership`]: the ownership predicate applied to every mutation
//! - [`password`]: bcrypt hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use blogmesh_core::{AppError, Identity, ensure_owner};
//!
//! ensure_owner(blog.author, &caller, "update this blog")?;
//! ```

pub mod errors;
pub mod identity;
pub mod ownership;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use identity::Identity;
pub use ownership::{Owned, authorize_mutation, ensure_owner, is_owner};
pub use password::{hash_password, verify_password};
