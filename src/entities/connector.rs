//! Listen-port connector entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityType};

/// A listen-port connector
///
/// The effective dependency logic for a connector is selected by its
/// `scheme` string rather than its static type, which is the seam that
/// lets plugins contribute processors for custom transports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connector {
    pub id: Option<EntityId>,

    /// Unique connector name
    pub name: String,

    /// Transport scheme, e.g. "http", "https", "raw-tcp"
    pub scheme: String,

    pub port: u16,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Scheme-specific properties; values of password-named keys may embed
    /// secure-password placeholders
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, String>,

    #[serde(default)]
    pub version: u32,

    pub created: DateTime<Utc>,
}

fn default_enabled() -> bool {
    true
}

impl Entity for Connector {
    const TYPE: EntityType = EntityType::Connector;

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

impl Connector {
    pub fn new(name: impl Into<String>, scheme: impl Into<String>, port: u16) -> Self {
        Self {
            id: Some(EntityId::new(EntityType::Connector)),
            name: name.into(),
            scheme: scheme.into(),
            port,
            enabled: true,
            properties: BTreeMap::new(),
            version: 1,
            created: Utc::now(),
        }
    }
}
