//! Processor registry: maps entity types and connector schemes to the
//! dependency processor that walks them

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::core::identity::EntityType;
use crate::core::store::FindError;
use crate::dependency::finder::DependencyFinder;
use crate::dependency::graph::Dependency;
use crate::entities::StoredEntity;

/// Registry key: a structural entity type, or a free-form connector scheme
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProcessorKey {
    Type(EntityType),
    Scheme(String),
}

impl ProcessorKey {
    pub fn scheme(s: impl Into<String>) -> Self {
        ProcessorKey::Scheme(s.into())
    }
}

impl fmt::Display for ProcessorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessorKey::Type(t) => write!(f, "type:{t}"),
            ProcessorKey::Scheme(s) => write!(f, "scheme:{s}"),
        }
    }
}

/// Extracts an entity's direct dependencies
///
/// Implementations report dependencies in discovery order and deduplicate
/// within their own output; the finder handles recursion and cycles.
pub trait DependencyProcessor: Send + Sync {
    fn find_dependencies(
        &self,
        entity: &StoredEntity,
        finder: &mut DependencyFinder<'_>,
    ) -> Result<Vec<Dependency>, FindError>;
}

/// Mutable mapping from processor keys to processors
///
/// An unregistered key is not a fault: it means that entity kind
/// contributes no further dependencies. Registration is last-write-wins so
/// tests and plugins can replace built-ins at runtime.
#[derive(Default)]
pub struct DependencyProcessorRegistry {
    processors: RwLock<HashMap<ProcessorKey, Arc<dyn DependencyProcessor>>>,
}

impl DependencyProcessorRegistry {
    /// An empty registry with no processors
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a processor, replacing any existing one for the key
    pub fn register(&self, key: ProcessorKey, processor: Arc<dyn DependencyProcessor>) {
        debug!(%key, "registering dependency processor");
        self.processors.write().insert(key, processor);
    }

    /// Remove the processor for a key; no-op when absent
    pub fn remove(&self, key: &ProcessorKey) {
        self.processors.write().remove(key);
    }

    /// Look up the processor for a key
    pub fn resolve(&self, key: &ProcessorKey) -> Option<Arc<dyn DependencyProcessor>> {
        self.processors.read().get(key).cloned()
    }

    /// The processor to use for an entity: its dynamic scheme key when one
    /// is registered, otherwise its static type key
    pub fn resolve_for(&self, entity: &StoredEntity) -> Option<Arc<dyn DependencyProcessor>> {
        if let Some(scheme) = entity.scheme() {
            if let Some(processor) = self.resolve(&ProcessorKey::scheme(scheme)) {
                return Some(processor);
            }
        }
        self.resolve(&ProcessorKey::Type(entity.entity_type()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Connector;

    struct Marker(&'static str);

    impl DependencyProcessor for Marker {
        fn find_dependencies(
            &self,
            _entity: &StoredEntity,
            _finder: &mut DependencyFinder<'_>,
        ) -> Result<Vec<Dependency>, FindError> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_last_registration_wins() {
        let registry = DependencyProcessorRegistry::empty();
        let key = ProcessorKey::Type(EntityType::Policy);
        let first: Arc<dyn DependencyProcessor> = Arc::new(Marker("first"));
        let second: Arc<dyn DependencyProcessor> = Arc::new(Marker("second"));
        registry.register(key.clone(), first.clone());
        registry.register(key.clone(), second.clone());

        let resolved = registry.resolve(&key).unwrap();
        assert!(Arc::ptr_eq(&resolved, &second));
        assert!(!Arc::ptr_eq(&resolved, &first));
        assert_eq!(registry.processors.read().len(), 1);
    }

    #[test]
    fn test_remove_is_noop_when_absent() {
        let registry = DependencyProcessorRegistry::empty();
        registry.remove(&ProcessorKey::scheme("amqp"));
        assert!(registry.resolve(&ProcessorKey::scheme("amqp")).is_none());
    }

    #[test]
    fn test_scheme_takes_precedence_over_type() {
        let registry = DependencyProcessorRegistry::empty();
        registry.register(
            ProcessorKey::Type(EntityType::Connector),
            Arc::new(Marker("by-type")),
        );
        registry.register(ProcessorKey::scheme("amqp"), Arc::new(Marker("by-scheme")));

        let amqp = StoredEntity::from(Connector::new("queue", "amqp", 5672));
        let https = StoredEntity::from(Connector::new("web", "https", 8443));

        let by_scheme = registry.resolve_for(&amqp).unwrap();
        let by_type = registry.resolve_for(&https).unwrap();
        assert!(!Arc::ptr_eq(&by_scheme, &by_type));
    }
}
