//! Secure password entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityType};

/// Kind of stored secret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretKind {
    #[default]
    Password,
    PemPrivateKey,
}

/// A stored secure password
///
/// The secret material itself never leaves the store; this entity carries
/// only the metadata other entities reference by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurePassword {
    pub id: Option<EntityId>,

    /// Unique name, referenced via `${secpass.<name>.plaintext}` templates
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub kind: SecretKind,

    /// Whether the secret may be expanded inside context variables
    #[serde(default)]
    pub usable_from_variables: bool,

    #[serde(default)]
    pub version: u32,

    pub created: DateTime<Utc>,
}

impl Entity for SecurePassword {
    const TYPE: EntityType = EntityType::SecurePassword;

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

impl SecurePassword {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Some(EntityId::new(EntityType::SecurePassword)),
            name: name.into(),
            description: None,
            kind: SecretKind::default(),
            usable_from_variables: true,
            version: 1,
            created: Utc::now(),
        }
    }
}
