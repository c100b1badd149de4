//! Policy assertion tree
//!
//! Policies are trees of assertions. Several assertion kinds reference
//! other configuration entities, either by explicit name fields or through
//! `${secpass...}` placeholders embedded in string values; the assertion
//! dependency walker extracts both.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One node of a policy's assertion tree
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Assertion {
    /// All children must succeed
    All { children: Vec<Assertion> },

    /// At least one child must succeed
    OneOrMore { children: Vec<Assertion> },

    /// Run a query against a named JDBC connection
    JdbcQuery {
        connection_name: String,
        query: String,
    },

    /// Include a policy fragment by name
    Include { policy_name: String },

    /// Route the request to a backend URL; the URL template may embed
    /// secure-password placeholders
    HttpRoute { url: String },

    /// Set a context variable; the value may embed secure-password
    /// placeholders
    SetVariable { name: String, value: String },

    /// Authenticate against a named identity provider
    Authenticate { provider_name: String },

    /// Verify a signature against a named trusted certificate
    VerifyCertificate { cert_name: String },

    /// Third-party assertion; property values may embed secure-password
    /// placeholders
    Custom {
        type_name: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        properties: BTreeMap<String, String>,
    },
}

impl Assertion {
    /// Composite children, if this assertion has any
    pub fn children(&self) -> Option<&[Assertion]> {
        match self {
            Assertion::All { children } | Assertion::OneOrMore { children } => Some(children),
            _ => None,
        }
    }

    /// Convenience constructor for an `All` composite
    pub fn all(children: Vec<Assertion>) -> Self {
        Assertion::All { children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let assertion = Assertion::JdbcQuery {
            connection_name: "main-db".to_string(),
            query: "select 1".to_string(),
        };
        let yaml = serde_yml::to_string(&assertion).unwrap();
        assert!(yaml.contains("kind: jdbc_query"));
        let parsed: Assertion = serde_yml::from_str(&yaml).unwrap();
        assert!(matches!(parsed, Assertion::JdbcQuery { connection_name, .. } if connection_name == "main-db"));
    }

    #[test]
    fn test_children_only_on_composites() {
        let leaf = Assertion::HttpRoute {
            url: "https://backend".to_string(),
        };
        assert!(leaf.children().is_none());

        let composite = Assertion::all(vec![leaf]);
        assert_eq!(composite.children().map(|c| c.len()), Some(1));
    }
}
