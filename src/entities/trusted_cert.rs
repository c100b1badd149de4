//! Trusted certificate entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityType};

/// A trusted certificate registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustedCert {
    pub id: Option<EntityId>,

    /// Display name
    pub name: String,

    /// Certificate subject DN
    pub subject_dn: String,

    /// Whether the cert anchors outbound TLS trust
    #[serde(default)]
    pub trusted_for_ssl: bool,

    /// Whether the cert may sign federated credentials
    #[serde(default)]
    pub trusted_for_signing: bool,

    #[serde(default)]
    pub version: u32,

    pub created: DateTime<Utc>,
}

impl Entity for TrustedCert {
    const TYPE: EntityType = EntityType::TrustedCert;

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

impl TrustedCert {
    pub fn new(name: impl Into<String>, subject_dn: impl Into<String>) -> Self {
        Self {
            id: Some(EntityId::new(EntityType::TrustedCert)),
            name: name.into(),
            subject_dn: subject_dn.into(),
            trusted_for_ssl: true,
            trusted_for_signing: false,
            version: 1,
            created: Utc::now(),
        }
    }
}
