//! Entity trait - common interface for all persisted entity types

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::core::identity::{EntityId, EntityType};

/// Common trait for all gateway configuration entities
pub trait Entity: Serialize + DeserializeOwned {
    /// The static entity type
    const TYPE: EntityType;

    /// The entity's identifier, or None if it has not been persisted yet
    fn id(&self) -> Option<&EntityId>;

    /// The entity's unique name
    fn name(&self) -> &str;

    /// Store-managed version counter
    fn version(&self) -> u32;

    /// Creation timestamp
    fn created(&self) -> DateTime<Utc>;
}

/// A lightweight reference to a persisted entity
///
/// Headers are what callers hand to the dependency analyzer and what the
/// store contracts accept for point lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHeader {
    /// Entity identifier (carries the entity type)
    pub id: EntityId,

    /// Unique name at the time the header was produced
    pub name: String,
}

impl EntityHeader {
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// The entity type, taken from the identifier
    pub fn entity_type(&self) -> EntityType {
        self.id.entity_type()
    }
}

impl std::fmt::Display for EntityHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
