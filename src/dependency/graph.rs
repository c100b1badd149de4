//! Dependency graph value types
//!
//! A traversal result is a tree view of a DAG: the same entity may appear
//! under several parents, but one analyzer invocation never re-descends
//! into a node it is already visiting.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use crate::core::identity::{EntityId, EntityType};
use crate::entities::StoredEntity;

/// One node of a dependency tree
///
/// Identity is `(entity_type, id)`. Dangling references carry no id; for
/// those, identity falls back to the unresolved reference text held in
/// `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependentEntity {
    pub entity_type: EntityType,

    /// Internal identifier; None only for dangling references
    pub id: Option<EntityId>,

    /// Externally visible GUID, if the entity publishes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_id: Option<String>,

    /// Display name, or the unresolved reference text for dangling nodes
    pub name: String,
}

impl DependentEntity {
    /// Build a node from a resolved entity
    pub fn of(entity: &StoredEntity) -> Self {
        Self {
            entity_type: entity.entity_type(),
            id: entity.id().cloned(),
            public_id: entity.public_id().map(str::to_string),
            name: entity.name().to_string(),
        }
    }

    /// Build a node for a reference that could not be resolved
    pub fn dangling(entity_type: EntityType, reference: impl Into<String>) -> Self {
        Self {
            entity_type,
            id: None,
            public_id: None,
            name: reference.into(),
        }
    }
}

impl PartialEq for DependentEntity {
    fn eq(&self, other: &Self) -> bool {
        if self.entity_type != other.entity_type {
            return false;
        }
        match (&self.id, &other.id) {
            (Some(a), Some(b)) => a == b,
            (None, None) => self.name == other.name,
            _ => false,
        }
    }
}

impl Eq for DependentEntity {}

impl Hash for DependentEntity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.entity_type.hash(state);
        match &self.id {
            Some(id) => id.hash(state),
            None => self.name.hash(state),
        }
    }
}

/// A dependency edge plus the subtree below it
///
/// `children` are in the order the owning processor discovered them;
/// callers must not assume any canonical sort beyond stability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub dependent: DependentEntity,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Dependency>,

    /// True when the referenced entity could not be loaded
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unresolved: bool,
}

impl Dependency {
    /// An edge to a resolved entity; children are filled in by the finder
    pub fn resolved(dependent: DependentEntity) -> Self {
        Self {
            dependent,
            children: Vec::new(),
            unresolved: false,
        }
    }

    /// An edge to a reference that did not resolve
    pub fn dangling(entity_type: EntityType, reference: impl Into<String>) -> Self {
        Self {
            dependent: DependentEntity::dangling(entity_type, reference),
            children: Vec::new(),
            unresolved: true,
        }
    }
}

/// Root wrapper returned to analyzer callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencySearchResults {
    pub dependent: DependentEntity,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
}

impl DependencySearchResults {
    /// Total number of dependency nodes in the tree (tree positions, not
    /// distinct entities)
    pub fn node_count(&self) -> usize {
        fn count(deps: &[Dependency]) -> usize {
            deps.iter().map(|d| 1 + count(&d.children)).sum()
        }
        count(&self.dependencies)
    }

    /// Depth-first iteration over every dependency node
    pub fn iter_nodes(&self) -> impl Iterator<Item = &Dependency> {
        let mut stack: Vec<&Dependency> = self.dependencies.iter().rev().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ClusterProperty;

    #[test]
    fn test_identity_by_type_and_id() {
        let prop = ClusterProperty::new("a", "1");
        let stored = StoredEntity::from(prop);
        let a = DependentEntity::of(&stored);
        let mut b = a.clone();
        b.name = "renamed".to_string();
        // Same id, different display name: still the same node.
        assert_eq!(a, b);
    }

    #[test]
    fn test_dangling_identity_by_name() {
        let a = DependentEntity::dangling(EntityType::SecurePassword, "missing");
        let b = DependentEntity::dangling(EntityType::SecurePassword, "missing");
        let c = DependentEntity::dangling(EntityType::SecurePassword, "other");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_resolved_and_dangling_never_equal() {
        let stored = StoredEntity::from(ClusterProperty::new("x", "1"));
        let resolved = DependentEntity::of(&stored);
        let dangling = DependentEntity::dangling(EntityType::ClusterProperty, "x");
        assert_ne!(resolved, dangling);
    }

    #[test]
    fn test_node_count_and_iteration() {
        let leaf = Dependency::dangling(EntityType::SecurePassword, "gone");
        let mut mid = Dependency::resolved(DependentEntity::dangling(
            EntityType::JdbcConnection,
            "db",
        ));
        mid.children.push(leaf);
        let results = DependencySearchResults {
            dependent: DependentEntity::dangling(EntityType::Policy, "root"),
            dependencies: vec![mid],
        };
        assert_eq!(results.node_count(), 2);
        assert_eq!(results.iter_nodes().count(), 2);
    }
}
