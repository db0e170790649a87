//! Integration tests for dependency resolution over a populated registry

use dynamo_context::{
    ClientConfig, ContextError, DependencyResolver, DependencyResolverExt, ServiceRegistry,
    StorageClient, TableContext, TypeKey,
};
use std::sync::Arc;

use crate::integration::test_utils::{cloud_source, counting_context};

counting_context!(CatalogContext);
counting_context!(UnregisteredContext);

trait AuditLog: Send + Sync {
    fn name(&self) -> &str;
}

struct MemoryAuditLog;

impl AuditLog for MemoryAuditLog {
    fn name(&self) -> &str {
        "memory"
    }
}

/// Consumer that only sees the resolver seam
fn table_count(resolver: &dyn DependencyResolver) -> Result<usize, ContextError> {
    let table = resolver.get::<dyn TableContext>()?;
    Ok(table.model().len())
}

#[test]
fn test_strict_and_tolerant_lookups_agree_when_present() {
    let mut registry = ServiceRegistry::new();
    registry.add_context::<CatalogContext>(&cloud_source()).unwrap();
    let resolver = registry.resolver();

    let strict = resolver.get::<CatalogContext>().unwrap();
    let tolerant = resolver.try_get::<CatalogContext>().unwrap();
    assert!(Arc::ptr_eq(&strict, &tolerant));

    let client = resolver.get::<dyn StorageClient>().unwrap();
    assert_eq!(
        client.config(),
        resolver.get::<ClientConfig>().unwrap().as_ref()
    );

    assert_eq!(table_count(&resolver).unwrap(), 1);
}

#[test]
fn test_missing_service() {
    let registry = ServiceRegistry::new();
    let resolver = registry.resolver();

    assert!(resolver.try_get::<UnregisteredContext>().is_none());
    match resolver.get::<UnregisteredContext>() {
        Err(ContextError::Resolution(name)) => assert!(name.contains("UnregisteredContext")),
        other => panic!("expected resolution error, got {:?}", other.err()),
    }
    assert!(resolver
        .try_get_dependency(&TypeKey::of::<dyn TableContext>())
        .is_none());
    assert!(matches!(
        table_count(&resolver),
        Err(ContextError::Resolution(_))
    ));
}

#[test]
fn test_application_services_resolve_alongside_contexts() {
    let mut registry = ServiceRegistry::new();
    registry.add_singleton::<dyn AuditLog>(Arc::new(MemoryAuditLog), "MemoryAuditLog");
    registry.add_context::<CatalogContext>(&cloud_source()).unwrap();

    let resolver = registry.resolver();
    assert_eq!(resolver.get::<dyn AuditLog>().unwrap().name(), "memory");
    assert!(resolver.try_get::<CatalogContext>().is_some());
}
