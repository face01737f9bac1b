//! Space (coworking location) reference.

use serde::{Deserialize, Serialize};

/// Identifier owned by the surrounding space registry.
pub type SpaceId = i64;

/// Tenant boundary that companies and members belong to.
///
/// Core never creates or mutates spaces; only `id` is stored on records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: SpaceId,
    pub name: String,
}

impl Space {
    pub fn new(id: SpaceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
