//! Cluster change-notification seam
//!
//! The transport that delivers invalidation events between cluster nodes is
//! out of scope; this module is the in-process end of it: a plain event
//! value, a listener trait, and an explicit subscriber list.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use crate::core::identity::{EntityId, EntityType};

/// Notification that persisted entities of one type changed somewhere in
/// the cluster
#[derive(Debug, Clone)]
pub struct EntityInvalidationEvent {
    /// Entity family the change applies to
    pub entity_type: EntityType,

    /// Identifiers reported changed; may be empty when the reporting node
    /// only knows the type
    pub ids: Vec<EntityId>,
}

impl EntityInvalidationEvent {
    pub fn new(entity_type: EntityType, ids: Vec<EntityId>) -> Self {
        Self { entity_type, ids }
    }
}

/// Receives invalidation events; implementors filter by entity type
pub trait InvalidationListener: Send + Sync {
    fn entity_invalidated(&self, event: &EntityInvalidationEvent);
}

/// Explicit subscription list for invalidation events
///
/// Publishing iterates subscribers on the caller's thread; listeners must
/// therefore be safe to invoke concurrently with their own operations.
#[derive(Default)]
pub struct InvalidationBus {
    listeners: Mutex<Vec<Arc<dyn InvalidationListener>>>,
}

impl InvalidationBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener; it stays subscribed for the life of the bus
    pub fn subscribe(&self, listener: Arc<dyn InvalidationListener>) {
        self.listeners.lock().push(listener);
    }

    /// Deliver an event to every subscriber
    pub fn publish(&self, event: &EntityInvalidationEvent) {
        let listeners: Vec<_> = self.listeners.lock().iter().cloned().collect();
        debug!(
            entity_type = %event.entity_type,
            ids = event.ids.len(),
            subscribers = listeners.len(),
            "publishing invalidation event"
        );
        for listener in listeners {
            listener.entity_invalidated(event);
        }
    }
}
