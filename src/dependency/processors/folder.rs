//! Folder dependency processor

use crate::core::store::FindError;
use crate::dependency::finder::DependencyFinder;
use crate::dependency::graph::Dependency;
use crate::dependency::registry::DependencyProcessor;
use crate::entities::StoredEntity;

/// Reports a folder's parent as its single dependency
///
/// Walking the parent chain is left to the finder's recursion; a corrupted
/// parent pointer that forms a loop is bounded by the visiting-set guard
/// like any other cycle.
#[derive(Debug, Default)]
pub struct FolderDependencyProcessor;

impl DependencyProcessor for FolderDependencyProcessor {
    fn find_dependencies(
        &self,
        entity: &StoredEntity,
        finder: &mut DependencyFinder<'_>,
    ) -> Result<Vec<Dependency>, FindError> {
        let StoredEntity::Folder(folder) = entity else {
            return Ok(Vec::new());
        };
        match &folder.parent_folder_id {
            Some(parent_id) => Ok(vec![finder.reference_by_id(parent_id)?]),
            None => Ok(Vec::new()),
        }
    }
}
