//! Domain models for blogmesh.
//!
//! Records are stored by the owning service (`FromRow`) and serialized to
//! clients (`Serialize` + `ToSchema`). Request bodies carry `Validate` rules.

pub mod blogs;
pub mod comments;
pub mod common;
pub mod health;
pub mod profiles;
pub mod users;
