//! Generic entity dependency processor

use crate::core::store::FindError;
use crate::dependency::finder::DependencyFinder;
use crate::dependency::graph::Dependency;
use crate::dependency::processors::dedup_dependencies;
use crate::dependency::registry::DependencyProcessor;
use crate::entities::StoredEntity;

/// Extracts a generic entity's declared related-entity references
#[derive(Debug, Default)]
pub struct GenericEntityProcessor;

impl DependencyProcessor for GenericEntityProcessor {
    fn find_dependencies(
        &self,
        entity: &StoredEntity,
        finder: &mut DependencyFinder<'_>,
    ) -> Result<Vec<Dependency>, FindError> {
        let StoredEntity::Generic(generic) = entity else {
            return Ok(Vec::new());
        };
        let mut dependencies = Vec::with_capacity(generic.related.len());
        for related in &generic.related {
            dependencies.push(finder.reference(related.entity_type, &related.name)?);
        }
        Ok(dedup_dependencies(dependencies))
    }
}
