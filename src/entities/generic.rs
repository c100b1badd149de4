//! Generic (custom) entity type
//!
//! Generic entities are how plugins persist their own configuration rows
//! without schema changes: a registered class name, a serialized value
//! body, and an explicit list of related entities. They are also the
//! entity family the cache manager fronts in practice (API plans, rate
//! limit profiles and similar frequently-read rows).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::cache::CacheableEntity;
use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityType};

/// A typed reference held in a generic entity's metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub entity_type: EntityType,
    pub name: String,
}

impl EntityRef {
    pub fn new(entity_type: EntityType, name: impl Into<String>) -> Self {
        Self {
            entity_type,
            name: name.into(),
        }
    }
}

/// A custom entity persisted under a registered class name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericEntity {
    pub id: Option<EntityId>,

    /// Externally visible GUID, if published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,

    /// Unique name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Registered class this row belongs to; lookups through a manager of
    /// a different class report a wrong-class find failure
    pub entity_class_name: String,

    /// Serialized value body (plugin-defined format)
    #[serde(default)]
    pub value: String,

    /// Declared related entities
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related: Vec<EntityRef>,

    #[serde(default)]
    pub version: u32,

    pub created: DateTime<Utc>,

    /// Last update timestamp; not a semantic field
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

impl Entity for GenericEntity {
    const TYPE: EntityType = EntityType::Generic;

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl GenericEntity {
    /// Create an unpersisted entity (no identifier yet)
    pub fn unsaved(name: impl Into<String>, entity_class_name: impl Into<String>) -> Self {
        Self {
            id: None,
            public_id: None,
            name: name.into(),
            description: None,
            entity_class_name: entity_class_name.into(),
            value: String::new(),
            related: Vec::new(),
            version: 0,
            created: Utc::now(),
            updated: None,
        }
    }

    /// Digest of the value body, used for cheap change detection
    pub fn value_digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.value.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

impl CacheableEntity for GenericEntity {
    fn set_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    fn semantically_equal(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.entity_class_name == other.entity_class_name
            && self.related == other.related
            && self.value_digest() == other.value_digest()
    }

    fn merge_into(&self, existing: &mut Self) {
        existing.description = self.description.clone();
        existing.value = self.value.clone();
        existing.related = self.related.clone();
        if self.public_id.is_some() {
            existing.public_id = self.public_id.clone();
        }
        existing.updated = Some(Utc::now());
        // id, name, version and created stay with the persisted row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsaved_has_no_id() {
        let entity = GenericEntity::unsaved("p1", "com.relay.ApiPlan");
        assert!(entity.id.is_none());
        assert_eq!(entity.version, 0);
    }

    #[test]
    fn test_value_digest_tracks_content() {
        let mut a = GenericEntity::unsaved("p1", "com.relay.ApiPlan");
        let mut b = a.clone();
        a.value = "v1".to_string();
        b.value = "v1".to_string();
        assert_eq!(a.value_digest(), b.value_digest());

        b.value = "v2".to_string();
        assert_ne!(a.value_digest(), b.value_digest());
    }

    #[test]
    fn test_semantic_equality_ignores_bookkeeping_fields() {
        let mut a = GenericEntity::unsaved("p1", "com.relay.ApiPlan");
        a.value = "v1".to_string();
        let mut b = a.clone();
        b.version = 7;
        b.updated = Some(Utc::now());
        assert!(a.semantically_equal(&b));

        b.value = "v2".to_string();
        assert!(!a.semantically_equal(&b));
    }

    #[test]
    fn test_merge_preserves_identity_fields() {
        let mut existing = GenericEntity::unsaved("p1", "com.relay.ApiPlan");
        existing.id = Some(EntityId::new(EntityType::Generic));
        existing.version = 3;

        let mut incoming = GenericEntity::unsaved("p1", "com.relay.ApiPlan");
        incoming.value = "v2".to_string();
        incoming.description = Some("updated plan".to_string());

        let id = existing.id.clone();
        incoming.merge_into(&mut existing);
        assert_eq!(existing.id, id);
        assert_eq!(existing.version, 3);
        assert_eq!(existing.value, "v2");
        assert_eq!(existing.description.as_deref(), Some("updated plan"));
        assert!(existing.updated.is_some());
    }
}
