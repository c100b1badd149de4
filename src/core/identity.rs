//! Entity identity system using type-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use ulid::Ulid;

/// Persisted configuration entity families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityType {
    /// Service policy or policy fragment
    Policy,
    /// Organizational folder
    Folder,
    /// JDBC connection definition
    JdbcConnection,
    /// Stored secure password
    SecurePassword,
    /// Cluster-wide property
    ClusterProperty,
    /// Trusted certificate
    TrustedCert,
    /// Identity provider configuration
    IdentityProvider,
    /// Listen-port connector
    Connector,
    /// Custom/generic registered entity
    Generic,
}

impl EntityType {
    /// Get the string representation of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Policy => "POLICY",
            EntityType::Folder => "FOLDER",
            EntityType::JdbcConnection => "JDBC",
            EntityType::SecurePassword => "SECPASS",
            EntityType::ClusterProperty => "CPROP",
            EntityType::TrustedCert => "CERT",
            EntityType::IdentityProvider => "IDPROV",
            EntityType::Connector => "CONN",
            EntityType::Generic => "GEN",
        }
    }

    /// Get all entity types
    pub fn all() -> &'static [EntityType] {
        &[
            EntityType::Policy,
            EntityType::Folder,
            EntityType::JdbcConnection,
            EntityType::SecurePassword,
            EntityType::ClusterProperty,
            EntityType::TrustedCert,
            EntityType::IdentityProvider,
            EntityType::Connector,
            EntityType::Generic,
        ]
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "POLICY" => Ok(EntityType::Policy),
            "FOLDER" => Ok(EntityType::Folder),
            "JDBC" => Ok(EntityType::JdbcConnection),
            "SECPASS" => Ok(EntityType::SecurePassword),
            "CPROP" => Ok(EntityType::ClusterProperty),
            "CERT" => Ok(EntityType::TrustedCert),
            "IDPROV" => Ok(EntityType::IdentityProvider),
            "CONN" => Ok(EntityType::Connector),
            "GEN" => Ok(EntityType::Generic),
            _ => Err(IdParseError::InvalidType(s.to_string())),
        }
    }
}

/// A unique entity identifier combining an entity type and a ULID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityId {
    entity_type: EntityType,
    ulid: Ulid,
}

impl EntityId {
    /// Create a new EntityId with a fresh ULID
    pub fn new(entity_type: EntityType) -> Self {
        Self {
            entity_type,
            ulid: Ulid::new(),
        }
    }

    /// Create an EntityId from a type and existing ULID
    pub fn from_parts(entity_type: EntityType, ulid: Ulid) -> Self {
        Self { entity_type, ulid }
    }

    /// Get the entity type
    pub fn entity_type(&self) -> EntityType {
        self.entity_type
    }

    /// Get the ULID component
    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse an EntityId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.entity_type, self.ulid)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (type_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let entity_type = type_str.parse()?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { entity_type, ulid })
    }
}

impl Serialize for EntityId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing entity IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("invalid entity type: '{0}' (valid: POLICY, FOLDER, JDBC, SECPASS, CPROP, CERT, IDPROV, CONN, GEN)")]
    InvalidType(String),

    #[error("missing '-' delimiter in entity ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}
