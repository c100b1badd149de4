//! Cluster property entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityType};

/// A cluster-wide key/value property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterProperty {
    pub id: Option<EntityId>,

    /// Unique property name
    pub name: String,

    /// Property value
    pub value: String,

    #[serde(default)]
    pub version: u32,

    pub created: DateTime<Utc>,
}

impl Entity for ClusterProperty {
    const TYPE: EntityType = EntityType::ClusterProperty;

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

impl ClusterProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Some(EntityId::new(EntityType::ClusterProperty)),
            name: name.into(),
            value: value.into(),
            version: 1,
            created: Utc::now(),
        }
    }
}
