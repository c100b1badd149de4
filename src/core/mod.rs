//! Core building blocks: identity, entity traits, stores, caching,
//! invalidation events, configuration and reference extraction

pub mod cache;
pub mod config;
pub mod entity;
pub mod events;
pub mod identity;
pub mod refs;
pub mod store;

pub use cache::{CacheAddError, CacheDeleteError, CacheUpdateError, CacheableEntity, EntityCacheManager};
pub use config::{ConfigProvider, MapConfig};
pub use entity::{Entity, EntityHeader};
pub use events::{EntityInvalidationEvent, InvalidationBus, InvalidationListener};
pub use identity::{EntityId, EntityType, IdParseError};
pub use refs::extract_secure_password_refs;
pub use store::{EntityResolver, FindError, NamedEntityStore};
