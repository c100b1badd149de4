//! Built-in dependency processor family
//!
//! One processor per entity family. Each reports direct dependencies in
//! discovery order and deduplicates its own output; recursion, cycles and
//! cross-level duplicates are the finder's concern.

pub mod assertion;
pub mod connector;
pub mod folder;
pub mod generic;
pub mod identity_provider;
pub mod leaf;
pub mod policy;

pub use assertion::AssertionWalker;
pub use connector::ConnectorDependencyProcessor;
pub use folder::FolderDependencyProcessor;
pub use generic::GenericEntityProcessor;
pub use identity_provider::IdentityProviderDependencyProcessor;
pub use leaf::LeafDependencyProcessor;
pub use policy::PolicyDependencyProcessor;

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::identity::EntityType;
use crate::dependency::graph::Dependency;
use crate::dependency::registry::{DependencyProcessorRegistry, ProcessorKey};

/// Drop repeated `(type, id)` edges, keeping first-appearance order
pub(crate) fn dedup_dependencies(dependencies: Vec<Dependency>) -> Vec<Dependency> {
    let mut seen = HashSet::new();
    dependencies
        .into_iter()
        .filter(|d| seen.insert(d.dependent.clone()))
        .collect()
}

/// A registry with every built-in processor registered under its type key
pub fn default_registry() -> DependencyProcessorRegistry {
    let registry = DependencyProcessorRegistry::empty();
    registry.register(
        ProcessorKey::Type(EntityType::Policy),
        Arc::new(PolicyDependencyProcessor::new()),
    );
    registry.register(
        ProcessorKey::Type(EntityType::Folder),
        Arc::new(FolderDependencyProcessor),
    );
    registry.register(
        ProcessorKey::Type(EntityType::Generic),
        Arc::new(GenericEntityProcessor),
    );
    registry.register(
        ProcessorKey::Type(EntityType::IdentityProvider),
        Arc::new(IdentityProviderDependencyProcessor),
    );
    registry.register(
        ProcessorKey::Type(EntityType::Connector),
        Arc::new(ConnectorDependencyProcessor),
    );
    for leaf_type in [
        EntityType::JdbcConnection,
        EntityType::SecurePassword,
        EntityType::ClusterProperty,
        EntityType::TrustedCert,
    ] {
        registry.register(
            ProcessorKey::Type(leaf_type),
            Arc::new(LeafDependencyProcessor),
        );
    }
    registry
}
