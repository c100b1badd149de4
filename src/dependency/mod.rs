//! Entity dependency analysis: graph types, processor registry, recursive
//! finder and the public analyzer

pub mod analyzer;
pub mod finder;
pub mod graph;
pub mod processors;
pub mod registry;

pub use analyzer::DependencyAnalyzer;
pub use finder::{DependencyError, DependencyFinder};
pub use graph::{Dependency, DependencySearchResults, DependentEntity};
pub use processors::default_registry;
pub use registry::{DependencyProcessor, DependencyProcessorRegistry, ProcessorKey};
