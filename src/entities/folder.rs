//! Folder entity type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityType};

/// An organizational folder
///
/// Folders form a tree rooted at the single folder with no parent. A
/// corrupted parent pointer can turn the chain into a cycle, which the
/// dependency walk bounds with its visiting-set guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub id: Option<EntityId>,

    pub name: String,

    /// Parent folder, or None for the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_folder_id: Option<EntityId>,

    #[serde(default)]
    pub version: u32,

    pub created: DateTime<Utc>,
}

impl Entity for Folder {
    const TYPE: EntityType = EntityType::Folder;

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

impl Folder {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            id: Some(EntityId::new(EntityType::Folder)),
            name: name.into(),
            parent_folder_id: None,
            version: 1,
            created: Utc::now(),
        }
    }

    pub fn child_of(parent: &Folder, name: impl Into<String>) -> Self {
        Self {
            id: Some(EntityId::new(EntityType::Folder)),
            name: name.into(),
            parent_folder_id: parent.id.clone(),
            version: 1,
            created: Utc::now(),
        }
    }
}
