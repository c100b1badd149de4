//! End-to-end tests driving the public API: dependency analysis over the
//! built-in processor family, the cache manager against a scripted store,
//! and invalidation delivery through the bus.

use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use relaycore::core::cache::EntityCacheManager;
use relaycore::core::entity::{Entity, EntityHeader};
use relaycore::core::events::{EntityInvalidationEvent, InvalidationBus};
use relaycore::core::identity::{EntityId, EntityType};
use relaycore::core::store::{
    DeleteError, EntityResolver, FindError, NamedEntityStore, SaveError, UpdateError,
};
use relaycore::dependency::registry::ProcessorKey;
use relaycore::dependency::{Dependency, DependencyAnalyzer, DependencyProcessor};
use relaycore::entities::{
    Assertion, EntityRef, Folder, GenericEntity, IdentityProvider, JdbcConnection, Policy,
    PolicyKind, ProviderConfig, SecurePassword, StoredEntity, TrustedCert,
};

/// In-memory gateway configuration database shared by the tests
#[derive(Default)]
struct MemoryGateway {
    entities: Mutex<HashMap<EntityId, StoredEntity>>,
}

impl MemoryGateway {
    fn insert(&self, entity: impl Into<StoredEntity>) -> EntityHeader {
        let entity = entity.into();
        let header = entity.header().expect("persisted entity has a header");
        self.entities.lock().insert(header.id.clone(), entity);
        header
    }
}

impl EntityResolver for MemoryGateway {
    fn find(&self, header: &EntityHeader) -> Result<Option<StoredEntity>, FindError> {
        Ok(self.entities.lock().get(&header.id).cloned())
    }

    fn find_by_name(
        &self,
        entity_type: EntityType,
        name: &str,
    ) -> Result<Option<StoredEntity>, FindError> {
        Ok(self
            .entities
            .lock()
            .values()
            .find(|e| e.entity_type() == entity_type && e.name() == name)
            .cloned())
    }
}

fn names_at(dependencies: &[Dependency]) -> Vec<&str> {
    dependencies
        .iter()
        .map(|d| d.dependent.name.as_str())
        .collect()
}

#[test]
fn test_policy_tree_resolves_every_reference_kind() {
    let gateway = Arc::new(MemoryGateway::default());
    gateway.insert(JdbcConnection::new(
        "main-db",
        "org.postgresql.Driver",
        "jdbc:postgresql://db/gw",
    ));
    gateway.insert(SecurePassword::new("db-pass"));
    gateway.insert(TrustedCert::new("partner-ca", "CN=Partner CA"));
    gateway.insert(IdentityProvider::new("corp-ldap", ProviderConfig::Internal));

    let policy = Policy::new(
        "checkout",
        PolicyKind::Service,
        Assertion::all(vec![
            Assertion::JdbcQuery {
                connection_name: "main-db".to_string(),
                query: "select key from vault where pw = '${secpass.db-pass.plaintext}'"
                    .to_string(),
            },
            Assertion::Authenticate {
                provider_name: "corp-ldap".to_string(),
            },
            Assertion::VerifyCertificate {
                cert_name: "partner-ca".to_string(),
            },
        ]),
    );
    let root = gateway.insert(policy);

    let analyzer = DependencyAnalyzer::new(gateway);
    let results = analyzer.get_dependencies(&root).unwrap();

    assert_eq!(results.dependent.name, "checkout");
    assert_eq!(
        names_at(&results.dependencies),
        vec!["main-db", "db-pass", "corp-ldap", "partner-ca"]
    );
    assert!(results.dependencies.iter().all(|d| !d.unresolved));
}

#[test]
fn test_mutually_including_fragments_terminate() {
    let gateway = Arc::new(MemoryGateway::default());
    gateway.insert(Policy::new(
        "frag-b",
        PolicyKind::Fragment,
        Assertion::Include {
            policy_name: "frag-a".to_string(),
        },
    ));
    let root = gateway.insert(Policy::new(
        "frag-a",
        PolicyKind::Fragment,
        Assertion::Include {
            policy_name: "frag-b".to_string(),
        },
    ));

    let analyzer = DependencyAnalyzer::new(gateway);
    let results = analyzer.get_dependencies(&root).unwrap();

    // frag-b sits under frag-a; the back-edge to frag-a stays a leaf.
    assert_eq!(names_at(&results.dependencies), vec!["frag-b"]);
    let back = &results.dependencies[0].children[0];
    assert_eq!(back.dependent.name, "frag-a");
    assert!(back.children.is_empty());
}

#[test]
fn test_missing_fragment_becomes_dangling_branch() {
    let gateway = Arc::new(MemoryGateway::default());
    let root = gateway.insert(Policy::new(
        "orphan",
        PolicyKind::Service,
        Assertion::all(vec![
            Assertion::Include {
                policy_name: "retired-fragment".to_string(),
            },
            Assertion::HttpRoute {
                url: "https://backend".to_string(),
            },
        ]),
    ));

    let analyzer = DependencyAnalyzer::new(gateway);
    let results = analyzer.get_dependencies(&root).unwrap();

    assert_eq!(results.dependencies.len(), 1);
    let dangling = &results.dependencies[0];
    assert!(dangling.unresolved);
    assert_eq!(dangling.dependent.name, "retired-fragment");
    assert!(dangling.dependent.id.is_none());
}

#[test]
fn test_folder_parent_chain_walks_to_root() {
    let gateway = Arc::new(MemoryGateway::default());
    let root_folder = Folder::root("root");
    let services = Folder::child_of(&root_folder, "services");
    let billing = Folder::child_of(&services, "billing");
    gateway.insert(root_folder);
    gateway.insert(services);
    let start = gateway.insert(billing);

    let analyzer = DependencyAnalyzer::new(gateway);
    let results = analyzer.get_dependencies(&start).unwrap();

    assert_eq!(names_at(&results.dependencies), vec!["services"]);
    let parent = &results.dependencies[0];
    assert_eq!(names_at(&parent.children), vec!["root"]);
    assert!(parent.children[0].children.is_empty());
}

#[test]
fn test_corrupted_folder_parent_loop_terminates() {
    let gateway = Arc::new(MemoryGateway::default());
    // Corrupted data: two folders claiming each other as parent.
    let mut a = Folder::root("a");
    let mut b = Folder::root("b");
    a.parent_folder_id = b.id.clone();
    b.parent_folder_id = a.id.clone();
    gateway.insert(b);
    let start = gateway.insert(a);

    let analyzer = DependencyAnalyzer::new(gateway);
    let results = analyzer.get_dependencies(&start).unwrap();

    // b sits under a; the back-edge to a stays an unexpanded leaf.
    assert_eq!(names_at(&results.dependencies), vec!["b"]);
    let back = &results.dependencies[0].children[0];
    assert_eq!(back.dependent.name, "a");
    assert!(back.children.is_empty());
    assert!(!back.unresolved);
}

#[test]
fn test_federated_provider_depends_on_its_certificates() {
    let gateway = Arc::new(MemoryGateway::default());
    let ca = TrustedCert::new("idp-ca", "CN=IdP CA");
    let ca_id = ca.id.clone().unwrap();
    gateway.insert(ca);

    let root = gateway.insert(IdentityProvider::new(
        "saml-partners",
        ProviderConfig::Federated {
            trusted_cert_ids: vec![ca_id],
        },
    ));

    let analyzer = DependencyAnalyzer::new(gateway);
    let results = analyzer.get_dependencies(&root).unwrap();
    assert_eq!(names_at(&results.dependencies), vec!["idp-ca"]);
}

#[test]
fn test_ldap_provider_extracts_secpass_from_ntlm_properties() {
    let gateway = Arc::new(MemoryGateway::default());
    gateway.insert(SecurePassword::new("bind-pass"));
    gateway.insert(SecurePassword::new("svc-account"));

    let mut ntlm = BTreeMap::new();
    ntlm.insert("service.password".to_string(), "svc-account".to_string());
    ntlm.insert("service.domain".to_string(), "CORP".to_string());

    let root = gateway.insert(IdentityProvider::new(
        "corp-ad",
        ProviderConfig::Ldap {
            url: "ldap://ad.corp".to_string(),
            search_base: "dc=corp".to_string(),
            bind_dn: "cn=bind".to_string(),
            bind_password: "${secpass.bind-pass.plaintext}".to_string(),
            ntlm_properties: ntlm,
        },
    ));

    let analyzer = DependencyAnalyzer::new(gateway);
    let results = analyzer.get_dependencies(&root).unwrap();

    let mut names = names_at(&results.dependencies);
    names.sort_unstable();
    assert_eq!(names, vec!["bind-pass", "svc-account"]);
}

#[test]
fn test_scheme_processor_registered_at_runtime_wins() {
    struct AmqpProcessor {
        calls: AtomicUsize,
    }

    impl DependencyProcessor for AmqpProcessor {
        fn find_dependencies(
            &self,
            _entity: &StoredEntity,
            _finder: &mut relaycore::dependency::DependencyFinder<'_>,
        ) -> Result<Vec<Dependency>, FindError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    let gateway = Arc::new(MemoryGateway::default());
    let root = gateway.insert(relaycore::entities::Connector::new("events", "amqp", 5672));

    let analyzer = DependencyAnalyzer::new(gateway);
    let amqp = Arc::new(AmqpProcessor {
        calls: AtomicUsize::new(0),
    });
    analyzer
        .registry()
        .register(ProcessorKey::Scheme("amqp".to_string()), amqp.clone());

    analyzer.get_dependencies(&root).unwrap();
    assert_eq!(amqp.calls.load(Ordering::SeqCst), 1);
}

/// Store double for the cache scenario; counts physical update calls
#[derive(Default)]
struct PlanStore {
    rows: Mutex<HashMap<String, GenericEntity>>,
    update_calls: AtomicUsize,
}

impl NamedEntityStore<GenericEntity> for PlanStore {
    fn find_by_unique_name(&self, name: &str) -> Result<Option<GenericEntity>, FindError> {
        Ok(self.rows.lock().get(name).cloned())
    }

    fn save(&self, entity: &GenericEntity) -> Result<EntityId, SaveError> {
        let id = EntityId::new(EntityType::Generic);
        let mut saved = entity.clone();
        saved.id = Some(id.clone());
        saved.version = 1;
        self.rows.lock().insert(saved.name.clone(), saved);
        Ok(id)
    }

    fn update(&self, entity: &GenericEntity) -> Result<(), UpdateError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.rows
            .lock()
            .insert(entity.name.clone(), entity.clone());
        Ok(())
    }

    fn delete(&self, entity: &GenericEntity) -> Result<(), DeleteError> {
        self.rows.lock().remove(&entity.name);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<GenericEntity>, FindError> {
        Ok(self.rows.lock().values().cloned().collect())
    }
}

fn plan(name: &str, value: &str) -> GenericEntity {
    let mut entity = GenericEntity::unsaved(name, "com.relay.ApiPlan");
    entity.value = value.to_string();
    entity
}

#[test]
fn test_plan_lifecycle_through_cache() {
    let store = Arc::new(PlanStore::default());
    let cache = EntityCacheManager::new(store.clone());

    // Add then read back.
    let added = cache.add(plan("p1", "v1")).unwrap();
    let id = added.id.clone().unwrap();
    let found = cache.find("p1").unwrap().unwrap();
    assert_eq!(found.id, added.id);
    assert_eq!(found.value, "v1");

    // A real change hits the store exactly once.
    cache.update(&plan("p1", "v2")).unwrap();
    assert_eq!(store.update_calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.find("p1").unwrap().unwrap().value, "v2");

    // Repeating the same payload skips the store entirely.
    cache.update(&plan("p1", "v2")).unwrap();
    assert_eq!(store.update_calls.load(Ordering::SeqCst), 1);

    // Delete evicts the name entry but keeps the reverse index.
    cache.delete("p1").unwrap();
    assert!(cache.find("p1").unwrap().is_none());
    assert_eq!(cache.name_for_id(&id).as_deref(), Some("p1"));
}

#[test]
fn test_cache_snapshot_is_read_only() {
    let cache = EntityCacheManager::new(Arc::new(PlanStore::default()));
    cache.add(plan("p1", "v1")).unwrap();

    let mut snapshot = cache.find("p1").unwrap().unwrap();
    assert!(Arc::get_mut(&mut snapshot).is_none());

    // A caller edits a clone and persists it through update instead.
    let mut draft = (*snapshot).clone();
    draft.value = "v2".to_string();
    cache.update(&draft).unwrap();
    assert_eq!(cache.find("p1").unwrap().unwrap().value, "v2");
}

#[test]
fn test_invalidation_event_refreshes_from_store() {
    let store = Arc::new(PlanStore::default());
    let cache = Arc::new(EntityCacheManager::new(store.clone()));

    let bus = InvalidationBus::new();
    bus.subscribe(cache.clone());

    cache.add(plan("p1", "v1")).unwrap();

    // Another node rewrites the row behind this cache's back.
    {
        let mut rows = store.rows.lock();
        let row = rows.get_mut("p1").unwrap();
        row.value = "v2".to_string();
    }
    assert_eq!(cache.find("p1").unwrap().unwrap().value, "v1");

    bus.publish(&EntityInvalidationEvent::new(EntityType::Generic, vec![]));
    assert_eq!(cache.find("p1").unwrap().unwrap().value, "v2");
}
