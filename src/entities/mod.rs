//! Concrete configuration entity types

pub mod assertion;
pub mod cluster_property;
pub mod connector;
pub mod folder;
pub mod generic;
pub mod identity_provider;
pub mod jdbc_connection;
pub mod policy;
pub mod secure_password;
pub mod trusted_cert;

pub use assertion::Assertion;
pub use cluster_property::ClusterProperty;
pub use connector::Connector;
pub use folder::Folder;
pub use generic::{EntityRef, GenericEntity};
pub use identity_provider::{IdentityProvider, ProviderConfig};
pub use jdbc_connection::JdbcConnection;
pub use policy::{Policy, PolicyKind};
pub use secure_password::{SecretKind, SecurePassword};
pub use trusted_cert::TrustedCert;

use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, EntityHeader};
use crate::core::identity::{EntityId, EntityType};

/// Any persisted entity, as handed back by the heterogeneous resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum StoredEntity {
    Policy(Policy),
    Folder(Folder),
    JdbcConnection(JdbcConnection),
    SecurePassword(SecurePassword),
    ClusterProperty(ClusterProperty),
    TrustedCert(TrustedCert),
    IdentityProvider(IdentityProvider),
    Connector(Connector),
    Generic(GenericEntity),
}

impl StoredEntity {
    pub fn entity_type(&self) -> EntityType {
        match self {
            StoredEntity::Policy(_) => EntityType::Policy,
            StoredEntity::Folder(_) => EntityType::Folder,
            StoredEntity::JdbcConnection(_) => EntityType::JdbcConnection,
            StoredEntity::SecurePassword(_) => EntityType::SecurePassword,
            StoredEntity::ClusterProperty(_) => EntityType::ClusterProperty,
            StoredEntity::TrustedCert(_) => EntityType::TrustedCert,
            StoredEntity::IdentityProvider(_) => EntityType::IdentityProvider,
            StoredEntity::Connector(_) => EntityType::Connector,
            StoredEntity::Generic(_) => EntityType::Generic,
        }
    }

    pub fn id(&self) -> Option<&EntityId> {
        match self {
            StoredEntity::Policy(e) => e.id(),
            StoredEntity::Folder(e) => e.id(),
            StoredEntity::JdbcConnection(e) => e.id(),
            StoredEntity::SecurePassword(e) => e.id(),
            StoredEntity::ClusterProperty(e) => e.id(),
            StoredEntity::TrustedCert(e) => e.id(),
            StoredEntity::IdentityProvider(e) => e.id(),
            StoredEntity::Connector(e) => e.id(),
            StoredEntity::Generic(e) => e.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            StoredEntity::Policy(e) => e.name(),
            StoredEntity::Folder(e) => e.name(),
            StoredEntity::JdbcConnection(e) => e.name(),
            StoredEntity::SecurePassword(e) => e.name(),
            StoredEntity::ClusterProperty(e) => e.name(),
            StoredEntity::TrustedCert(e) => e.name(),
            StoredEntity::IdentityProvider(e) => e.name(),
            StoredEntity::Connector(e) => e.name(),
            StoredEntity::Generic(e) => e.name(),
        }
    }

    /// Externally visible GUID, for the families that publish one
    pub fn public_id(&self) -> Option<&str> {
        match self {
            StoredEntity::Policy(e) => e.public_id.as_deref(),
            StoredEntity::Generic(e) => e.public_id.as_deref(),
            _ => None,
        }
    }

    /// Dynamic dispatch key for connector-like entities; None for every
    /// family whose processor is selected by static type
    pub fn scheme(&self) -> Option<&str> {
        match self {
            StoredEntity::Connector(e) => Some(&e.scheme),
            _ => None,
        }
    }

    /// Header for a persisted entity; None when it has no identifier yet
    pub fn header(&self) -> Option<EntityHeader> {
        self.id()
            .map(|id| EntityHeader::new(id.clone(), self.name()))
    }
}

impl From<Policy> for StoredEntity {
    fn from(e: Policy) -> Self {
        StoredEntity::Policy(e)
    }
}

impl From<Folder> for StoredEntity {
    fn from(e: Folder) -> Self {
        StoredEntity::Folder(e)
    }
}

impl From<JdbcConnection> for StoredEntity {
    fn from(e: JdbcConnection) -> Self {
        StoredEntity::JdbcConnection(e)
    }
}

impl From<SecurePassword> for StoredEntity {
    fn from(e: SecurePassword) -> Self {
        StoredEntity::SecurePassword(e)
    }
}

impl From<ClusterProperty> for StoredEntity {
    fn from(e: ClusterProperty) -> Self {
        StoredEntity::ClusterProperty(e)
    }
}

impl From<TrustedCert> for StoredEntity {
    fn from(e: TrustedCert) -> Self {
        StoredEntity::TrustedCert(e)
    }
}

impl From<IdentityProvider> for StoredEntity {
    fn from(e: IdentityProvider) -> Self {
        StoredEntity::IdentityProvider(e)
    }
}

impl From<Connector> for StoredEntity {
    fn from(e: Connector) -> Self {
        StoredEntity::Connector(e)
    }
}

impl From<GenericEntity> for StoredEntity {
    fn from(e: GenericEntity) -> Self {
        StoredEntity::Generic(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_only_for_connectors() {
        let conn = StoredEntity::from(Connector::new("web", "https", 8443));
        assert_eq!(conn.scheme(), Some("https"));

        let folder = StoredEntity::from(Folder::root("root"));
        assert_eq!(folder.scheme(), None);
    }

    #[test]
    fn test_header_carries_id_and_name() {
        let prop = ClusterProperty::new("cluster.host", "gw1");
        let id = prop.id.clone().unwrap();
        let header = StoredEntity::from(prop).header().unwrap();
        assert_eq!(header.id, id);
        assert_eq!(header.name, "cluster.host");
    }
}
