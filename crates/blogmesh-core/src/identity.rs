//! The caller identity resolved from a bearer token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity bound to a verified token.
///
/// Lives for one request only; resource services never persist it beyond
/// copying `id` into an owner field at creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: Uuid,
    pub username: String,
}

impl Identity {
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}
