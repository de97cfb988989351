//! Identity shared by every aggregate
//!
//! Aggregates hold a [`UniqueEntityId`] next to their own fields and compare
//! by it through [`Entity::same_identity_as`].

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque, string-backed identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniqueEntityId(String);

impl UniqueEntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Use the given id, or generate one when absent
    pub fn or_new(id: Option<UniqueEntityId>) -> Self {
        id.unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for UniqueEntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<String> for UniqueEntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for UniqueEntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<Uuid> for UniqueEntityId {
    fn from(id: Uuid) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for UniqueEntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything identified by a [`UniqueEntityId`]
pub trait Entity {
    fn id(&self) -> &UniqueEntityId;

    /// Two entities are the same when their ids match, whatever their other fields hold
    fn same_identity_as(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        self.id() == other.id()
    }
}
