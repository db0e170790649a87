//! Service Registry
//!
//! Minimal typed registry the storage contexts are published into. Every entry is
//! a singleton: an `Arc<T>` stored under the `TypeKey` of the capability `T` it
//! serves (which may be a `dyn Trait`), optionally under a string key. When one
//! capability is registered more than once, lookups return the latest entry.
//!
//! The registry also keeps the registration records of storage contexts. Records
//! are only written together with the entries of a successful registration and are
//! never removed.

use crate::resolver::RegistryResolver;
use crate::types::TypeKey;
use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Type-erased singleton. Holds an `Arc<T>` for the capability `T`.
pub type ServiceInstance = Arc<dyn Any + Send + Sync>;

/// One registered singleton
#[derive(Clone)]
pub struct ServiceDescriptor {
    service: TypeKey,
    key: Option<String>,
    implementation: &'static str,
    instance: ServiceInstance,
}

impl ServiceDescriptor {
    /// Unkeyed singleton serving capability `T`
    pub fn singleton<T: ?Sized + Send + Sync + 'static>(
        instance: Arc<T>,
        implementation: &'static str,
    ) -> Self {
        Self {
            service: TypeKey::of::<T>(),
            key: None,
            implementation,
            instance: Arc::new(instance),
        }
    }

    /// Singleton serving capability `T` under `key`
    pub fn keyed_singleton<T: ?Sized + Send + Sync + 'static>(
        key: impl Into<String>,
        instance: Arc<T>,
        implementation: &'static str,
    ) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::singleton(instance, implementation)
        }
    }

    /// Capability the entry is registered under
    pub fn service(&self) -> TypeKey {
        self.service
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    /// Type name of the concrete value behind the capability
    pub fn implementation(&self) -> &'static str {
        self.implementation
    }

    pub fn instance(&self) -> &ServiceInstance {
        &self.instance
    }

    /// The stored `Arc<T>`, if this entry serves `T`
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        (*self.instance).downcast_ref::<Arc<T>>().cloned()
    }
}

impl fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("service", &self.service)
            .field("key", &self.key)
            .field("implementation", &self.implementation)
            .finish()
    }
}

/// Entries of one context registration, committed together
#[derive(Debug)]
pub(crate) struct RegistrationBatch {
    context: TypeKey,
    descriptors: Vec<ServiceDescriptor>,
}

impl RegistrationBatch {
    pub(crate) fn new(context: TypeKey) -> Self {
        Self {
            context,
            descriptors: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, descriptor: ServiceDescriptor) {
        self.descriptors.push(descriptor);
    }
}

/// Registry of singleton services and context registration records
#[derive(Debug, Default)]
pub struct ServiceRegistry {
    descriptors: Vec<ServiceDescriptor>,
    contexts: HashSet<TypeKey>,
}

impl ServiceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `instance` as the singleton serving capability `T`
    pub fn add_singleton<T: ?Sized + Send + Sync + 'static>(
        &mut self,
        instance: Arc<T>,
        implementation: &'static str,
    ) -> &mut Self {
        self.descriptors
            .push(ServiceDescriptor::singleton(instance, implementation));
        self
    }

    /// Register `instance` as the singleton serving capability `T` under `key`
    pub fn add_keyed_singleton<T: ?Sized + Send + Sync + 'static>(
        &mut self,
        key: impl Into<String>,
        instance: Arc<T>,
        implementation: &'static str,
    ) -> &mut Self {
        self.descriptors
            .push(ServiceDescriptor::keyed_singleton(key, instance, implementation));
        self
    }

    /// Latest unkeyed singleton serving `T`
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.find(&TypeKey::of::<T>(), None)
            .and_then(ServiceDescriptor::downcast::<T>)
    }

    /// Latest singleton serving `T` under `key`
    pub fn get_keyed<T: ?Sized + Send + Sync + 'static>(&self, key: &str) -> Option<Arc<T>> {
        self.find(&TypeKey::of::<T>(), Some(key))
            .and_then(ServiceDescriptor::downcast::<T>)
    }

    /// Latest unkeyed entry for a capability, without knowing its static type
    pub fn find_service(&self, service: &TypeKey) -> Option<&ServiceDescriptor> {
        self.find(service, None)
    }

    pub fn contains<T: ?Sized + 'static>(&self) -> bool {
        let service = TypeKey::of::<T>();
        self.descriptors.iter().any(|d| d.service == service)
    }

    /// All entries in registration order
    pub fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Whether a registration record exists for the context type
    pub fn is_context_registered(&self, context: &TypeKey) -> bool {
        self.contexts.contains(context)
    }

    /// Context types registered so far, in no particular order
    pub fn registered_contexts(&self) -> impl Iterator<Item = &TypeKey> {
        self.contexts.iter()
    }

    /// Strict and tolerant lookups over this registry
    pub fn resolver(&self) -> RegistryResolver<'_> {
        RegistryResolver::new(self)
    }

    /// Publish a batch and record its context, or change nothing.
    pub(crate) fn commit(&mut self, batch: RegistrationBatch) -> Result<(), RegistrationBatch> {
        if self.contexts.contains(&batch.context) {
            return Err(batch);
        }
        self.contexts.insert(batch.context);
        self.descriptors.extend(batch.descriptors);
        Ok(())
    }

    fn find(&self, service: &TypeKey, key: Option<&str>) -> Option<&ServiceDescriptor> {
        self.descriptors
            .iter()
            .rev()
            .find(|d| d.service == *service && d.key.as_deref() == key)
    }
}
