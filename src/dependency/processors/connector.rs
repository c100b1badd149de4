//! Connector dependency processor
//!
//! Connectors are dispatched by their scheme string first: a processor
//! registered under `ProcessorKey::Scheme` wins, which is how plugins add
//! dependency logic for custom transports without touching core code.
//! This default processor handles every scheme without a dedicated entry.

use crate::core::identity::EntityType;
use crate::core::refs::extract_secure_password_refs;
use crate::core::store::FindError;
use crate::dependency::finder::DependencyFinder;
use crate::dependency::graph::Dependency;
use crate::dependency::processors::dedup_dependencies;
use crate::dependency::registry::DependencyProcessor;
use crate::entities::StoredEntity;

/// Scheme-agnostic fallback: scans connector properties for embedded
/// secure-password references
#[derive(Debug, Default)]
pub struct ConnectorDependencyProcessor;

impl DependencyProcessor for ConnectorDependencyProcessor {
    fn find_dependencies(
        &self,
        entity: &StoredEntity,
        finder: &mut DependencyFinder<'_>,
    ) -> Result<Vec<Dependency>, FindError> {
        let StoredEntity::Connector(connector) = entity else {
            return Ok(Vec::new());
        };
        let mut dependencies = Vec::new();
        for value in connector.properties.values() {
            for name in extract_secure_password_refs(value) {
                dependencies.push(finder.reference(EntityType::SecurePassword, &name)?);
            }
        }
        Ok(dedup_dependencies(dependencies))
    }
}
