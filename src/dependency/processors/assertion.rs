//! Assertion-tree dependency walking
//!
//! The deepest and most cycle-prone path: assertions reference JDBC
//! connections, policies (fragment includes), identity providers, trusted
//! certs, and secure passwords embedded in string templates.

use crate::core::identity::EntityType;
use crate::core::refs::extract_secure_password_refs;
use crate::core::store::FindError;
use crate::dependency::finder::DependencyFinder;
use crate::dependency::graph::Dependency;
use crate::entities::Assertion;

/// Walks an assertion tree, collecting entity references in tree order
#[derive(Debug, Default, Clone, Copy)]
pub struct AssertionWalker;

impl AssertionWalker {
    pub fn new() -> Self {
        Self
    }

    /// Collect the direct dependencies of one assertion subtree
    pub fn find_dependencies(
        &self,
        assertion: &Assertion,
        finder: &mut DependencyFinder<'_>,
    ) -> Result<Vec<Dependency>, FindError> {
        let mut dependencies = Vec::new();
        self.collect(assertion, finder, &mut dependencies)?;
        Ok(dependencies)
    }

    fn collect(
        &self,
        assertion: &Assertion,
        finder: &mut DependencyFinder<'_>,
        out: &mut Vec<Dependency>,
    ) -> Result<(), FindError> {
        match assertion {
            Assertion::All { children } | Assertion::OneOrMore { children } => {
                for child in children {
                    self.collect(child, finder, out)?;
                }
            }
            Assertion::JdbcQuery {
                connection_name,
                query,
            } => {
                out.push(finder.reference(EntityType::JdbcConnection, connection_name)?);
                self.collect_secpass(query, finder, out)?;
            }
            Assertion::Include { policy_name } => {
                out.push(finder.reference(EntityType::Policy, policy_name)?);
            }
            Assertion::HttpRoute { url } => {
                self.collect_secpass(url, finder, out)?;
            }
            Assertion::SetVariable { value, .. } => {
                self.collect_secpass(value, finder, out)?;
            }
            Assertion::Authenticate { provider_name } => {
                out.push(finder.reference(EntityType::IdentityProvider, provider_name)?);
            }
            Assertion::VerifyCertificate { cert_name } => {
                out.push(finder.reference(EntityType::TrustedCert, cert_name)?);
            }
            Assertion::Custom { properties, .. } => {
                for value in properties.values() {
                    self.collect_secpass(value, finder, out)?;
                }
            }
        }
        Ok(())
    }

    fn collect_secpass(
        &self,
        value: &str,
        finder: &mut DependencyFinder<'_>,
        out: &mut Vec<Dependency>,
    ) -> Result<(), FindError> {
        for name in extract_secure_password_refs(value) {
            out.push(finder.reference(EntityType::SecurePassword, &name)?);
        }
        Ok(())
    }
}
