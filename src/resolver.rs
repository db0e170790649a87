//! Dependency Resolver
//!
//! Read-through lookups over a [`ServiceRegistry`]. The strict path reports a
//! [`ContextError::Resolution`]; the tolerant path turns any failure into `None`,
//! for optional integrations where a missing service is not fatal. Nothing is
//! cached: every call goes back to the registry.

use crate::error::ContextError;
use crate::registry::{ServiceInstance, ServiceRegistry};
use crate::types::TypeKey;
use std::sync::Arc;

/// Lookup of registered services by capability
pub trait DependencyResolver {
    /// Instance registered for `service`, or a resolution error
    fn get_dependency(&self, service: &TypeKey) -> Result<ServiceInstance, ContextError>;

    /// Same lookup as [`get_dependency`](Self::get_dependency), with failures
    /// turned into `None`
    fn try_get_dependency(&self, service: &TypeKey) -> Option<ServiceInstance> {
        self.get_dependency(service).ok()
    }
}

/// Typed wrappers over [`DependencyResolver`]
pub trait DependencyResolverExt: DependencyResolver {
    /// Instance serving capability `T`
    fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Result<Arc<T>, ContextError> {
        let service = TypeKey::of::<T>();
        let instance = self.get_dependency(&service)?;
        (*instance)
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or_else(|| {
                ContextError::Resolution(format!("{} (registered instance has another type)", service))
            })
    }

    fn try_get<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.get::<T>().ok()
    }
}

impl<R: DependencyResolver + ?Sized> DependencyResolverExt for R {}

/// Resolver backed by a service registry
#[derive(Debug, Clone, Copy)]
pub struct RegistryResolver<'a> {
    registry: &'a ServiceRegistry,
}

impl<'a> RegistryResolver<'a> {
    pub fn new(registry: &'a ServiceRegistry) -> Self {
        Self { registry }
    }
}

impl DependencyResolver for RegistryResolver<'_> {
    fn get_dependency(&self, service: &TypeKey) -> Result<ServiceInstance, ContextError> {
        self.registry
            .find_service(service)
            .map(|descriptor| Arc::clone(descriptor.instance()))
            .ok_or_else(|| ContextError::Resolution(service.to_string()))
    }
}
