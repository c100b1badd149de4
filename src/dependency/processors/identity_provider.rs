//! Identity provider dependency processor

use crate::core::identity::EntityType;
use crate::core::refs::extract_secure_password_refs;
use crate::core::store::FindError;
use crate::dependency::finder::DependencyFinder;
use crate::dependency::graph::Dependency;
use crate::dependency::processors::dedup_dependencies;
use crate::dependency::registry::DependencyProcessor;
use crate::entities::{ProviderConfig, StoredEntity};

/// Branches on the provider config tag
///
/// Federated providers depend on their trusted certificates; LDAP
/// providers depend on secure passwords referenced from the bind template
/// and from password-named NTLM properties; bind-only providers depend on
/// secure passwords embedded in the DN template.
#[derive(Debug, Default)]
pub struct IdentityProviderDependencyProcessor;

impl DependencyProcessor for IdentityProviderDependencyProcessor {
    fn find_dependencies(
        &self,
        entity: &StoredEntity,
        finder: &mut DependencyFinder<'_>,
    ) -> Result<Vec<Dependency>, FindError> {
        let StoredEntity::IdentityProvider(provider) = entity else {
            return Ok(Vec::new());
        };

        let mut dependencies = Vec::new();
        match &provider.config {
            ProviderConfig::Internal => {}
            ProviderConfig::Ldap {
                bind_password,
                ntlm_properties,
                ..
            } => {
                collect_secpass(bind_password, finder, &mut dependencies)?;
                for (key, value) in ntlm_properties {
                    if key.to_lowercase().contains("password") {
                        dependencies
                            .push(finder.reference(EntityType::SecurePassword, value)?);
                    }
                }
            }
            ProviderConfig::BindOnlyLdap { dn_template, .. } => {
                collect_secpass(dn_template, finder, &mut dependencies)?;
            }
            ProviderConfig::Federated { trusted_cert_ids } => {
                for cert_id in trusted_cert_ids {
                    dependencies.push(finder.reference_by_id(cert_id)?);
                }
            }
        }
        Ok(dedup_dependencies(dependencies))
    }
}

fn collect_secpass(
    value: &str,
    finder: &mut DependencyFinder<'_>,
    out: &mut Vec<Dependency>,
) -> Result<(), FindError> {
    for name in extract_secure_password_refs(value) {
        out.push(finder.reference(EntityType::SecurePassword, &name)?);
    }
    Ok(())
}
