//! JDBC connection entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityType};

/// A named JDBC connection definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdbcConnection {
    /// Unique identifier
    pub id: Option<EntityId>,

    /// Unique connection name
    pub name: String,

    /// Driver class name
    pub driver_class: String,

    /// JDBC URL; may embed secure-password placeholders
    pub jdbc_url: String,

    /// Whether the connection is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Driver-specific properties
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    #[serde(default)]
    pub version: u32,

    pub created: DateTime<Utc>,
}

fn default_enabled() -> bool {
    true
}

impl Entity for JdbcConnection {
    const TYPE: EntityType = EntityType::JdbcConnection;

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

impl JdbcConnection {
    pub fn new(name: impl Into<String>, driver_class: impl Into<String>, jdbc_url: impl Into<String>) -> Self {
        Self {
            id: Some(EntityId::new(EntityType::JdbcConnection)),
            name: name.into(),
            driver_class: driver_class.into(),
            jdbc_url: jdbc_url.into(),
            enabled: true,
            properties: BTreeMap::new(),
            version: 1,
            created: Utc::now(),
        }
    }
}
