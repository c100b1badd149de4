//! Identity-aware entity cache manager
//!
//! Fronts a `NamedEntityStore` for one entity type with two coherent maps:
//! `by_name` holds read-only snapshots keyed by unique name, `id_to_name`
//! remembers the last-known name for each identifier. Snapshots are
//! `Arc<T>`: the cache's copy can never be mutated through a handle it
//! hands out, so callers edit a clone and call `update` to persist.
//!
//! Map entries are only ever replaced whole, never mutated in place, so a
//! reader racing a writer observes either the fully-old or fully-new
//! entry.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

use crate::core::entity::Entity;
use crate::core::events::{EntityInvalidationEvent, InvalidationListener};
use crate::core::identity::EntityId;
use crate::core::store::{DeleteError, FindError, NamedEntityStore, SaveError, UpdateError};

/// Entity types the cache manager can front
pub trait CacheableEntity: Entity + Clone + Send + Sync + 'static {
    /// Record the store-assigned identifier after a save
    fn set_id(&mut self, id: EntityId);

    /// Record the store-managed version counter
    fn set_version(&mut self, version: u32);

    /// Whether two instances agree on every semantic field (timestamps and
    /// other bookkeeping fields excluded)
    fn semantically_equal(&self, other: &Self) -> bool;

    /// Copy this instance's mutable fields onto the persisted row,
    /// preserving its identifier, name, version and creation time
    fn merge_into(&self, existing: &mut Self);
}

/// Errors from `EntityCacheManager::add`
#[derive(Debug, Error)]
pub enum CacheAddError {
    #[error("entity already has an identifier: {0}")]
    IdentifierAssigned(EntityId),

    #[error(transparent)]
    Save(#[from] SaveError),
}

/// Errors from `EntityCacheManager::update`
#[derive(Debug, Error)]
pub enum CacheUpdateError {
    #[error("no entity named '{0}'")]
    NotFound(String),

    #[error("entity carries no name")]
    MissingName,

    #[error(transparent)]
    Find(#[from] FindError),

    #[error(transparent)]
    Update(#[from] UpdateError),
}

/// Errors from `EntityCacheManager::delete`
#[derive(Debug, Error)]
pub enum CacheDeleteError {
    #[error("no entity named '{0}'")]
    NotFound(String),

    #[error(transparent)]
    Find(#[from] FindError),

    #[error(transparent)]
    Delete(#[from] DeleteError),
}

struct CacheState<T> {
    by_name: HashMap<String, Arc<T>>,
    id_to_name: HashMap<EntityId, String>,
}

impl<T> Default for CacheState<T> {
    fn default() -> Self {
        Self {
            by_name: HashMap::new(),
            id_to_name: HashMap::new(),
        }
    }
}

/// Read-through/write-through cache over one entity type's store
pub struct EntityCacheManager<T: CacheableEntity> {
    store: Arc<dyn NamedEntityStore<T>>,
    state: RwLock<CacheState<T>>,
}

impl<T: CacheableEntity> EntityCacheManager<T> {
    pub fn new(store: Arc<dyn NamedEntityStore<T>>) -> Self {
        Self {
            store,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Persist a new entity and cache the saved snapshot
    ///
    /// The entity's identifier must be unset; the store assigns one.
    pub fn add(&self, entity: T) -> Result<Arc<T>, CacheAddError> {
        if let Some(id) = entity.id() {
            return Err(CacheAddError::IdentifierAssigned(id.clone()));
        }
        let id = self.store.save(&entity)?;
        let mut saved = entity;
        saved.set_id(id);
        saved.set_version(1);
        Ok(self.put(saved))
    }

    /// Merge changes onto the persisted row and cache the result
    ///
    /// When the payload differs only in non-semantic fields the physical
    /// store update is skipped, but the cache is still refreshed with the
    /// merged view.
    pub fn update(&self, entity: &T) -> Result<Arc<T>, CacheUpdateError> {
        let name = entity.name().to_string();
        if name.is_empty() {
            return Err(CacheUpdateError::MissingName);
        }
        let existing = match self.store.find_by_unique_name(&name) {
            Ok(Some(existing)) => existing,
            Ok(None) => return Err(CacheUpdateError::NotFound(name)),
            // A row of the wrong generic-entity class is "not found" for
            // this manager, not a class-mismatch fault.
            Err(e) if e.is_wrong_class() => return Err(CacheUpdateError::NotFound(name)),
            Err(e) => return Err(e.into()),
        };

        let update_needed = !entity.semantically_equal(&existing);
        let mut merged = existing.clone();
        entity.merge_into(&mut merged);

        if update_needed {
            self.store.update(&merged)?;
            // The version counter is store-managed; read the row back
            // rather than guessing the bump. If the read-back races a
            // concurrent change, the merged view stands in until the next
            // cache miss.
            if let Ok(Some(persisted)) = self.store.find_by_unique_name(&name) {
                merged = persisted;
            }
        } else {
            debug!(name, "update not needed, refreshing cache only");
        }
        Ok(self.put(merged))
    }

    /// Delete by unique name and evict the name entry
    ///
    /// The id-to-name mapping is intentionally retained so the last-known
    /// name of a deleted entity stays available for audit display.
    pub fn delete(&self, name: &str) -> Result<(), CacheDeleteError> {
        let existing = match self.store.find_by_unique_name(name) {
            Ok(Some(existing)) => existing,
            Ok(None) => return Err(CacheDeleteError::NotFound(name.to_string())),
            Err(e) if e.is_wrong_class() => {
                return Err(CacheDeleteError::NotFound(name.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        self.store.delete(&existing)?;
        self.state.write().by_name.remove(name);
        debug!(name, "deleted entity and evicted name entry");
        Ok(())
    }

    /// Read-through lookup by unique name
    ///
    /// Absence is `Ok(None)`; a wrong-class row normalizes to `Ok(None)`
    /// as well. Any other store failure propagates and leaves the cache
    /// untouched.
    pub fn find(&self, name: &str) -> Result<Option<Arc<T>>, FindError> {
        if let Some(hit) = self.state.read().by_name.get(name) {
            return Ok(Some(hit.clone()));
        }
        match self.store.find_by_unique_name(name) {
            Ok(Some(entity)) => Ok(Some(self.put(entity))),
            Ok(None) => Ok(None),
            Err(e) if e.is_wrong_class() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Load every entity of this type, bypassing the single-entity caches
    ///
    /// Always source-of-truth from the store; an empty store yields an
    /// empty vector.
    pub fn find_all(&self) -> Result<Vec<T>, FindError> {
        self.store.find_all()
    }

    /// Last-known name for an identifier, surviving deletion
    pub fn name_for_id(&self, id: &EntityId) -> Option<String> {
        self.state.read().id_to_name.get(id).cloned()
    }

    /// Number of cached name entries (diagnostic)
    pub fn cached_count(&self) -> usize {
        self.state.read().by_name.len()
    }

    fn put(&self, entity: T) -> Arc<T> {
        let snapshot = Arc::new(entity);
        let mut state = self.state.write();
        if let Some(id) = snapshot.id() {
            state
                .id_to_name
                .insert(id.clone(), snapshot.name().to_string());
        }
        state
            .by_name
            .insert(snapshot.name().to_string(), snapshot.clone());
        snapshot
    }
}

impl<T: CacheableEntity> InvalidationListener for EntityCacheManager<T> {
    /// Coarse invalidation: any event for this manager's type clears the
    /// whole name cache; `id_to_name` is left untouched.
    fn entity_invalidated(&self, event: &EntityInvalidationEvent) {
        if event.entity_type != T::TYPE {
            return;
        }
        let mut state = self.state.write();
        let evicted = state.by_name.len();
        state.by_name.clear();
        debug!(entity_type = %event.entity_type, evicted, "cluster invalidation cleared name cache");
    }
}
