//! Store contracts consumed by the cache manager and dependency walker
//!
//! The persistent store itself lives outside this crate; these traits are
//! the abstract surface the core consumes. Each verb carries its own error
//! type so failures propagate to callers with their original meaning.

use thiserror::Error;

use crate::core::entity::{Entity, EntityHeader};
use crate::core::identity::{EntityId, EntityType};
use crate::entities::StoredEntity;

/// Reason text the store reports when a generic entity row exists but is
/// registered under a different concrete class than the one requested.
///
/// Matching on this string is a compatibility requirement with the store
/// component; `FindError::is_wrong_class` is the single place it is used.
pub const WRONG_CLASS_REASON: &str = "not of expected class";

/// Errors raised by store lookups
#[derive(Debug, Error)]
pub enum FindError {
    #[error("backing store failure: {0}")]
    Backend(String),

    #[error("invalid generic entity: {reason}")]
    InvalidGenericEntity { reason: String },

    #[error("missing required entity {entity_type} '{name}'")]
    MissingRequired { entity_type: EntityType, name: String },
}

impl FindError {
    /// Whether this failure means "row exists but is not the expected
    /// generic-entity class" - callers normalize that case to not-found.
    pub fn is_wrong_class(&self) -> bool {
        matches!(self, FindError::InvalidGenericEntity { reason } if reason.contains(WRONG_CLASS_REASON))
    }
}

/// Errors raised by store saves
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("backing store failure: {0}")]
    Backend(String),
}

/// Errors raised by store updates
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("backing store failure: {0}")]
    Backend(String),
}

/// Errors raised by store deletes
#[derive(Debug, Error)]
pub enum DeleteError {
    #[error("backing store failure: {0}")]
    Backend(String),
}

/// Heterogeneous entity lookup used by the dependency walk
///
/// Absent entities are a valid outcome (`Ok(None)`), never an error.
pub trait EntityResolver: Send + Sync {
    /// Load the entity a header points at
    fn find(&self, header: &EntityHeader) -> Result<Option<StoredEntity>, FindError>;

    /// Load an entity of a given type by its unique name
    fn find_by_name(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Result<Option<StoredEntity>, FindError>;
}

/// Homogeneous store for one entity type, fronted by an `EntityCacheManager`
pub trait NamedEntityStore<T: Entity>: Send + Sync {
    /// Load by unique name; None when absent
    fn find_by_unique_name(&self, name: &str) -> Result<Option<T>, FindError>;

    /// Persist a new entity and return its store-assigned identifier
    fn save(&self, entity: &T) -> Result<EntityId, SaveError>;

    /// Update an existing persisted entity
    fn update(&self, entity: &T) -> Result<(), UpdateError>;

    /// Delete a persisted entity
    fn delete(&self, entity: &T) -> Result<(), DeleteError>;

    /// Load every entity of this type
    fn find_all(&self) -> Result<Vec<T>, FindError>;
}
