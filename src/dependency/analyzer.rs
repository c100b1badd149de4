//! Public dependency analysis entry point

use std::sync::Arc;
use tracing::debug;

use crate::core::entity::EntityHeader;
use crate::core::store::EntityResolver;
use crate::dependency::finder::{DependencyError, DependencyFinder};
use crate::dependency::graph::DependencySearchResults;
use crate::dependency::processors::default_registry;
use crate::dependency::registry::DependencyProcessorRegistry;

/// Analyzes the dependency tree of a single entity
///
/// Each invocation builds a fresh finder, so traversal state never leaks
/// between requests and concurrent callers need no coordination.
pub struct DependencyAnalyzer {
    resolver: Arc<dyn EntityResolver>,
    registry: Arc<DependencyProcessorRegistry>,
}

impl DependencyAnalyzer {
    /// Analyzer with the built-in processor family
    pub fn new(resolver: Arc<dyn EntityResolver>) -> Self {
        Self {
            resolver,
            registry: Arc::new(default_registry()),
        }
    }

    /// Analyzer over a caller-supplied registry (custom or test processors)
    pub fn with_registry(
        resolver: Arc<dyn EntityResolver>,
        registry: Arc<DependencyProcessorRegistry>,
    ) -> Self {
        Self { resolver, registry }
    }

    /// The registry, for registering custom scheme processors at runtime
    pub fn registry(&self) -> &DependencyProcessorRegistry {
        &self.registry
    }

    /// Discover the full dependency tree below one entity header
    pub fn get_dependencies(
        &self,
        header: &EntityHeader,
    ) -> Result<DependencySearchResults, DependencyError> {
        let mut finder = DependencyFinder::new(self.resolver.as_ref(), &self.registry);
        let results = finder.get_dependencies(header)?;
        debug!(root = %header, nodes = results.node_count(), "dependency traversal complete");
        Ok(results)
    }
}
