//! Identity provider entity type
//!
//! Provider subtypes are modelled as a tagged union rather than a class
//! hierarchy; dependency extraction switches on the tag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::entity::Entity;
use crate::core::identity::{EntityId, EntityType};

/// Subtype-specific identity provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    /// Built-in internal identity store; no external dependencies
    Internal,

    /// Full LDAP provider
    Ldap {
        url: String,
        search_base: String,
        bind_dn: String,
        /// Bind credential template; typically a `${secpass...}` placeholder
        bind_password: String,
        /// NTLM passthrough properties; values of password-named keys are
        /// secure-password name references
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        ntlm_properties: BTreeMap<String, String>,
    },

    /// Bind-only (simple bind) LDAP provider
    BindOnlyLdap {
        url: String,
        /// DN template expanded per login; may embed `${secpass...}`
        /// placeholders for a service credential
        dn_template: String,
    },

    /// Federated provider trusting a set of certificates
    Federated {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        trusted_cert_ids: Vec<EntityId>,
    },
}

/// An identity provider registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityProvider {
    pub id: Option<EntityId>,

    /// Unique provider name
    pub name: String,

    pub config: ProviderConfig,

    #[serde(default)]
    pub version: u32,

    pub created: DateTime<Utc>,
}

impl Entity for IdentityProvider {
    const TYPE: EntityType = EntityType::IdentityProvider;

    fn id(&self) -> Option<&EntityId> {
        self.id.as_ref()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

impl IdentityProvider {
    pub fn new(name: impl Into<String>, config: ProviderConfig) -> Self {
        Self {
            id: Some(EntityId::new(EntityType::IdentityProvider)),
            name: name.into(),
            config,
            version: 1,
            created: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_tag_serialization() {
        let provider = IdentityProvider::new(
            "partners",
            ProviderConfig::Federated {
                trusted_cert_ids: vec![EntityId::new(EntityType::TrustedCert)],
            },
        );
        let yaml = serde_yml::to_string(&provider).unwrap();
        assert!(yaml.contains("type: federated"));
        let parsed: IdentityProvider = serde_yml::from_str(&yaml).unwrap();
        assert!(matches!(parsed.config, ProviderConfig::Federated { ref trusted_cert_ids } if trusted_cert_ids.len() == 1));
    }

    #[test]
    fn test_internal_has_no_payload() {
        let provider = IdentityProvider::new("internal", ProviderConfig::Internal);
        let yaml = serde_yml::to_string(&provider).unwrap();
        assert!(yaml.contains("type: internal"));
    }
}
