//! Context Registration
//!
//! Wires one storage context type into a [`ServiceRegistry`]:
//!
//! 1. reject a context type that already has a registration record
//! 2. seed an [`OptionsDraft`] from the configuration source
//! 3. run the caller's builder callback (a missing one is an argument error)
//! 4. validate and freeze the options
//! 5. build the client (through the registry's [`StorageClientFactory`], or the
//!    [`DefaultClientFactory`]) and run the context hooks
//! 6. publish every singleton and the registration record in one commit
//!
//! A failure at any step leaves the registry untouched.
//!
//! Registration takes `&mut ServiceRegistry`. Callers that share a registry across
//! threads during startup must serialize registrations themselves.

use crate::builder::OptionsBuilder;
use crate::client::{ClientConfig, DefaultClientFactory, StorageClient, StorageClientFactory};
use crate::config::ConfigurationSource;
use crate::context::{DataContext, StorageContext, TableContext};
use crate::error::ContextError;
use crate::model::ModelBuilder;
use crate::options::{ContextOptions, OptionsDraft};
use crate::registry::{RegistrationBatch, ServiceDescriptor, ServiceRegistry};
use crate::resolver::DependencyResolverExt;
use crate::types::TypeKey;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

/// Builder callback type, usable to spell out an absent callback:
/// `None::<OptionsCallback>`
pub type OptionsCallback = fn(&mut OptionsBuilder<'_>) -> Result<(), ContextError>;

/// Lifecycle of one context type within a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Unregistered,
    Validating,
    Constructing,
    Registered,
}

impl ServiceRegistry {
    /// Register context `C` with options taken from `source`.
    pub fn add_context<C: StorageContext>(
        &mut self,
        source: &dyn ConfigurationSource,
    ) -> Result<Arc<C>, ContextError> {
        Registration::<C>::new(self).run(
            source,
            Some(|_: &mut OptionsBuilder<'_>| -> Result<(), ContextError> { Ok(()) }),
        )
    }

    /// Register context `C` with options taken from `source`, then adjusted by
    /// `configure`.
    ///
    /// Passing `None` is a caller error and fails with
    /// [`ContextError::Argument`], unless `C` is already registered, which
    /// reports [`ContextError::DuplicateRegistration`] first. Use
    /// [`add_context`](Self::add_context) when there is nothing to customize.
    pub fn add_context_with<C, F>(
        &mut self,
        source: &dyn ConfigurationSource,
        configure: Option<F>,
    ) -> Result<Arc<C>, ContextError>
    where
        C: StorageContext,
        F: FnOnce(&mut OptionsBuilder<'_>) -> Result<(), ContextError>,
    {
        Registration::<C>::new(self).run(source, configure)
    }

    /// Where context type `context` stands in this registry
    pub fn registration_state(&self, context: &TypeKey) -> RegistrationState {
        if self.is_context_registered(context) {
            RegistrationState::Registered
        } else {
            RegistrationState::Unregistered
        }
    }

    /// Frozen options of a registered context type
    pub fn context_options<C: StorageContext>(&self) -> Option<Arc<ContextOptions>> {
        self.get_keyed::<ContextOptions>(TypeKey::of::<C>().name())
    }
}

struct Registration<'r, C> {
    registry: &'r mut ServiceRegistry,
    context: TypeKey,
    state: RegistrationState,
    _context: PhantomData<fn() -> C>,
}

impl<'r, C: StorageContext> Registration<'r, C> {
    fn new(registry: &'r mut ServiceRegistry) -> Self {
        Self {
            registry,
            context: TypeKey::of::<C>(),
            state: RegistrationState::Unregistered,
            _context: PhantomData,
        }
    }

    fn run<F>(
        mut self,
        source: &dyn ConfigurationSource,
        configure: Option<F>,
    ) -> Result<Arc<C>, ContextError>
    where
        F: FnOnce(&mut OptionsBuilder<'_>) -> Result<(), ContextError>,
    {
        if self.registry.is_context_registered(&self.context) {
            return Err(ContextError::DuplicateRegistration(
                self.context.to_string(),
            ));
        }

        let mut draft = OptionsDraft::seeded(self.context, source)?;
        let configure = configure.ok_or_else(|| {
            ContextError::argument("configure", "options callback must be provided")
        })?;
        configure(&mut draft.builder())?;

        self.advance(RegistrationState::Validating);
        let options = Arc::new(draft.freeze()?);
        let local_mode = options.local_mode();

        self.advance(RegistrationState::Constructing);
        let client_config = ClientConfig::from_options(&options)?;
        let client = self.client_factory().create(&client_config)?;

        C::on_configuring(&options);
        let mut model = ModelBuilder::new();
        C::on_model_creating(&mut model)?;

        let data = Arc::new(DataContext::new(
            Arc::clone(&client),
            Arc::clone(&options),
            model.build(),
        ));
        let context = Arc::new(C::from_data_context(Arc::clone(&data)));

        let mut batch = RegistrationBatch::new(self.context);
        batch.push(ServiceDescriptor::singleton::<dyn StorageClient>(
            client,
            std::any::type_name::<dyn StorageClient>(),
        ));
        batch.push(ServiceDescriptor::singleton(
            Arc::new(client_config.clone()),
            std::any::type_name::<ClientConfig>(),
        ));
        batch.push(ServiceDescriptor::singleton(
            Arc::clone(&context),
            std::any::type_name::<C>(),
        ));
        batch.push(ServiceDescriptor::singleton::<dyn TableContext>(
            data,
            std::any::type_name::<DataContext>(),
        ));
        batch.push(ServiceDescriptor::keyed_singleton(
            self.context.name(),
            options,
            std::any::type_name::<ContextOptions>(),
        ));

        if self.registry.commit(batch).is_err() {
            return Err(ContextError::DuplicateRegistration(
                self.context.to_string(),
            ));
        }
        self.advance(RegistrationState::Registered);

        info!(
            context = %self.context,
            endpoint = %client_config.endpoint,
            local_mode,
            "Storage context registered"
        );
        Ok(context)
    }

    fn client_factory(&self) -> Arc<dyn StorageClientFactory> {
        match self.registry.resolver().try_get::<dyn StorageClientFactory>() {
            Some(factory) => factory,
            None => Arc::new(DefaultClientFactory),
        }
    }

    fn advance(&mut self, next: RegistrationState) {
        debug!(
            context = %self.context,
            from = ?self.state,
            to = ?next,
            "Registration state changed"
        );
        self.state = next;
    }
}
