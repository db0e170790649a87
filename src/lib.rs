//! Dynamo Context: Typed Storage Context Registration
//!
//! Configures typed data-access contexts for a DynamoDB-style table store and
//! registers them, exactly once per context type, into a service registry. Options
//! are collected from a configuration source and a fluent builder, validated for
//! either cloud mode (region + credentials) or local mode (emulator service url),
//! then frozen before the client and context are published as singletons.
//!
//! ```ignore
//! let mut registry = ServiceRegistry::new();
//! let config = ConfigLoader::load(Path::new("."))?;
//! registry.add_context_with::<ShopContext, _>(&config, Some(|options: &mut OptionsBuilder<'_>| {
//!     options.use_local_mode("http://localhost:8000")?;
//!     Ok(())
//! }))?;
//! let shop = registry.get::<ShopContext>();
//! ```

pub mod builder;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod model;
pub mod options;
pub mod registration;
pub mod registry;
pub mod resolver;
pub mod types;

pub use builder::OptionsBuilder;
pub use client::{ClientConfig, DefaultClientFactory, Endpoint, StorageClient, StorageClientFactory};
pub use config::{ConfigLoader, ConfigurationSource};
pub use context::{DataContext, StorageContext, TableContext};
pub use error::ContextError;
pub use model::{EntityModel, Model, ModelBuilder};
pub use options::{ContextOptions, Credentials, EntryConversion, OptionsDraft, RegionEndpoint};
pub use registration::{OptionsCallback, RegistrationState};
pub use registry::{ServiceDescriptor, ServiceRegistry};
pub use resolver::{DependencyResolver, DependencyResolverExt, RegistryResolver};
pub use types::TypeKey;
