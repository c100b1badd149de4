//! Policy dependency processor

use crate::core::store::FindError;
use crate::dependency::finder::DependencyFinder;
use crate::dependency::graph::Dependency;
use crate::dependency::processors::{dedup_dependencies, AssertionWalker};
use crate::dependency::registry::DependencyProcessor;
use crate::entities::StoredEntity;

/// Walks a policy's assertion tree via the assertion walker
#[derive(Debug, Default)]
pub struct PolicyDependencyProcessor {
    walker: AssertionWalker,
}

impl PolicyDependencyProcessor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DependencyProcessor for PolicyDependencyProcessor {
    fn find_dependencies(
        &self,
        entity: &StoredEntity,
        finder: &mut DependencyFinder<'_>,
    ) -> Result<Vec<Dependency>, FindError> {
        let StoredEntity::Policy(policy) = entity else {
            return Ok(Vec::new());
        };
        let dependencies = self.walker.find_dependencies(&policy.root, finder)?;
        Ok(dedup_dependencies(dependencies))
    }
}
