//! Ownership authorization shared by every resource service.
//!
//! A resource records the id of the identity that created it. Only that
//! identity may update or delete it. Blog, comment, and profile services all
//! go through [`ensure_owner`] so the rule cannot drift between them.

use uuid::Uuid;

use crate::errors::AppError;
use crate::identity::Identity;

/// Resources that carry an immutable owner id.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

/// The single authorization predicate for mutations.
pub fn is_owner(owner_id: Uuid, caller: &Identity) -> bool {
    owner_id == caller.id
}

/// Rejects the mutation with 403 unless `caller` owns the resource.
///
/// `action` completes the sentence "Not authorized to ...", e.g.
/// `"update this blog"`.
pub fn ensure_owner(owner_id: Uuid, caller: &Identity, action: &str) -> Result<(), AppError> {
    if is_owner(owner_id, caller) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!("Not authorized to {}", action)))
    }
}

/// Convenience wrapper over [`ensure_owner`] for loaded resources.
pub fn authorize_mutation<R: Owned>(
    resource: &R,
    caller: &Identity,
    action: &str,
) -> Result<(), AppError> {
    ensure_owner(resource.owner_id(), caller, action)
}
