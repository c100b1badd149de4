//! Leaf dependency processor

use crate::core::store::FindError;
use crate::dependency::finder::DependencyFinder;
use crate::dependency::graph::Dependency;
use crate::dependency::registry::DependencyProcessor;
use crate::entities::StoredEntity;

/// Processor for entity families that declare zero further dependencies
/// (JDBC connections, secure passwords, cluster properties, trusted certs)
#[derive(Debug, Default)]
pub struct LeafDependencyProcessor;

impl DependencyProcessor for LeafDependencyProcessor {
    fn find_dependencies(
        &self,
        _entity: &StoredEntity,
        _finder: &mut DependencyFinder<'_>,
    ) -> Result<Vec<Dependency>, FindError> {
        Ok(Vec::new())
    }
}
