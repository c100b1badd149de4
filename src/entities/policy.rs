//! Policy entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityType};
use crate::entities::assertion::Assertion;

/// What role a policy plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Attached to a published service
    #[default]
    Service,
    /// Reusable fragment included from other policies
    Fragment,
    /// Gateway-internal policy (audit sink, debug trace)
    Internal,
}

/// A persisted policy: metadata plus its assertion tree
///
/// Fragments can include each other, including mutually; the dependency
/// walk is the place that bounds such cycles, not the entity itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    pub id: Option<EntityId>,

    /// Externally visible GUID, assigned on publication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,

    /// Unique policy name
    pub name: String,

    #[serde(default)]
    pub kind: PolicyKind,

    /// Root of the assertion tree
    pub root: Assertion,

    #[serde(default)]
    pub version: u32,

    pub created: DateTime<Utc>,
}

impl Entity for Policy {
    const TYPE: EntityType = EntityType::Policy;

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

impl Policy {
    pub fn new(name: impl Into<String>, kind: PolicyKind, root: Assertion) -> Self {
        Self {
            id: Some(EntityId::new(EntityType::Policy)),
            public_id: None,
            name: name.into(),
            kind,
            root,
            version: 1,
            created: Utc::now(),
        }
    }
}
