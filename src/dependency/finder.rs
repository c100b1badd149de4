//! Recursive dependency traversal
//!
//! One `DependencyFinder` lives for exactly one top-level request. It owns
//! the request-scoped visiting set that bounds cycles: a node observed in
//! the "visiting" state during recursion is the cycle signal and is kept
//! as a leaf instead of being expanded again.

use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::entity::EntityHeader;
use crate::core::identity::{EntityId, EntityType};
use crate::core::store::{EntityResolver, FindError};
use crate::dependency::graph::{Dependency, DependencySearchResults, DependentEntity};
use crate::dependency::registry::DependencyProcessorRegistry;
use crate::entities::StoredEntity;

/// Errors surfaced by a dependency traversal
#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("entity not found: {0}")]
    RootNotFound(EntityHeader),

    #[error(transparent)]
    Find(#[from] FindError),

    #[error("cannot retrieve dependencies of '{entity}': {source}")]
    CannotRetrieveDependencies {
        entity: String,
        #[source]
        source: FindError,
    },
}

/// Request-scoped traversal state
pub struct DependencyFinder<'a> {
    resolver: &'a dyn EntityResolver,
    registry: &'a DependencyProcessorRegistry,
    visiting: HashSet<EntityId>,
}

impl<'a> DependencyFinder<'a> {
    pub fn new(resolver: &'a dyn EntityResolver, registry: &'a DependencyProcessorRegistry) -> Self {
        Self {
            resolver,
            registry,
            visiting: HashSet::new(),
        }
    }

    /// Resolve the root entity and walk its full dependency tree
    pub fn get_dependencies(
        &mut self,
        header: &EntityHeader,
    ) -> Result<DependencySearchResults, DependencyError> {
        debug!(root = %header, "starting dependency traversal");
        let entity = self
            .resolver
            .find(header)?
            .ok_or_else(|| DependencyError::RootNotFound(header.clone()))?;
        let dependencies = self.walk(&entity)?;
        Ok(DependencySearchResults {
            dependent: DependentEntity::of(&entity),
            dependencies,
        })
    }

    fn walk(&mut self, entity: &StoredEntity) -> Result<Vec<Dependency>, DependencyError> {
        // Unpersisted entities cannot participate in the visiting set and
        // cannot be referenced back, so they contribute no subtree.
        let id = match entity.id() {
            Some(id) => id.clone(),
            None => return Ok(Vec::new()),
        };

        self.visiting.insert(id.clone());
        let result = self.walk_visiting(entity);
        self.visiting.remove(&id);
        result
    }

    fn walk_visiting(&mut self, entity: &StoredEntity) -> Result<Vec<Dependency>, DependencyError> {
        let mut dependencies = match self.registry.resolve_for(entity) {
            // No processor registered: this entity kind contributes no
            // further dependencies.
            None => Vec::new(),
            Some(processor) => processor.find_dependencies(entity, self).map_err(|source| {
                DependencyError::CannotRetrieveDependencies {
                    entity: entity.name().to_string(),
                    source,
                }
            })?,
        };

        for dependency in &mut dependencies {
            if dependency.unresolved {
                continue;
            }
            let Some(dep_id) = dependency.dependent.id.clone() else {
                dependency.unresolved = true;
                continue;
            };
            if self.visiting.contains(&dep_id) {
                trace!(node = %dep_id, "cycle detected, keeping node as leaf");
                continue;
            }
            let header = EntityHeader::new(dep_id, dependency.dependent.name.clone());
            match self.resolver.find(&header)? {
                Some(child) => dependency.children = self.walk(&child)?,
                // The entity disappeared between discovery and descent.
                None => dependency.unresolved = true,
            }
        }
        Ok(dependencies)
    }

    /// Whether a node is currently on the traversal stack
    pub fn is_visiting(&self, id: &EntityId) -> bool {
        self.visiting.contains(id)
    }

    /// Resolve a by-name reference into a dependency edge
    ///
    /// A missing entity becomes a dangling marker, not an error.
    pub fn reference(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Result<Dependency, FindError> {
        match self.resolver.find_by_name(entity_type, name)? {
            Some(entity) => Ok(Dependency::resolved(DependentEntity::of(&entity))),
            None => Ok(Dependency::dangling(entity_type, name)),
        }
    }

    /// Resolve a by-id reference into a dependency edge
    pub fn reference_by_id(&self, id: &EntityId) -> Result<Dependency, FindError> {
        let header = EntityHeader::new(id.clone(), id.to_string());
        match self.resolver.find(&header)? {
            Some(entity) => Ok(Dependency::resolved(DependentEntity::of(&entity))),
            None => Ok(Dependency::dangling(id.entity_type(), id.to_string())),
        }
    }

    /// Resolve a by-name reference whose target is mandatory
    ///
    /// Used by processors that declare referential integrity: a missing
    /// entity aborts the traversal instead of becoming a dangling marker.
    pub fn require_reference(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Result<Dependency, FindError> {
        match self.resolver.find_by_name(entity_type, name)? {
            Some(entity) => Ok(Dependency::resolved(DependentEntity::of(&entity))),
            None => Err(FindError::MissingRequired {
                entity_type,
                name: name.to_string(),
            }),
        }
    }
}
