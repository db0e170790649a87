//! Storage Contexts
//!
//! A storage context is the typed façade applications use to reach their tables.
//! Application contexts implement [`StorageContext`]; registration builds the
//! shared [`DataContext`] (client, frozen options, entity model) and hands it to
//! the application type's constructor.

use crate::client::StorageClient;
use crate::error::ContextError;
use crate::model::{Model, ModelBuilder};
use crate::options::{ContextOptions, EntryConversion};
use crate::types::TypeKey;
use std::fmt;
use std::sync::Arc;

/// Capability every registered context is also published under
pub trait TableContext: Send + Sync + fmt::Debug {
    fn client(&self) -> Arc<dyn StorageClient>;

    /// Conversion schema applied when mapping entities to records
    fn conversion(&self) -> EntryConversion;

    /// Table holding `entity`.
    ///
    /// An options override wins over the model's table, which wins over the
    /// entity's type name.
    fn table_name(&self, entity: &TypeKey) -> String;

    fn model(&self) -> &Model;
}

/// Application-defined context type.
///
/// The two hooks run exactly once per registration, before the context can be
/// resolved by anyone.
pub trait StorageContext: Send + Sync + Sized + 'static {
    /// Wrap the shared data context
    fn from_data_context(data: Arc<DataContext>) -> Self;

    /// Receives the finalized options
    fn on_configuring(options: &ContextOptions);

    /// Describes entity mappings. An error aborts the registration.
    fn on_model_creating(model: &mut ModelBuilder) -> Result<(), ContextError>;
}

/// Client, options and model shared by a registered context
pub struct DataContext {
    client: Arc<dyn StorageClient>,
    options: Arc<ContextOptions>,
    model: Model,
}

impl DataContext {
    pub fn new(client: Arc<dyn StorageClient>, options: Arc<ContextOptions>, model: Model) -> Self {
        Self {
            client,
            options,
            model,
        }
    }

    pub fn options(&self) -> &ContextOptions {
        &self.options
    }

    /// Table holding entity `E`
    pub fn table_name_of<E: 'static>(&self) -> String {
        self.table_name(&TypeKey::of::<E>())
    }
}

impl TableContext for DataContext {
    fn client(&self) -> Arc<dyn StorageClient> {
        Arc::clone(&self.client)
    }

    fn conversion(&self) -> EntryConversion {
        self.options.conversion()
    }

    fn table_name(&self, entity: &TypeKey) -> String {
        if let Some(name) = self.options.table_name_for(entity) {
            return name.to_string();
        }
        self.model
            .get(entity)
            .and_then(|model| model.table_name())
            .unwrap_or_else(|| entity.short_name())
            .to_string()
    }

    fn model(&self) -> &Model {
        &self.model
    }
}

impl fmt::Debug for DataContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataContext")
            .field("context_type", &self.options.context_type())
            .field("client", &self.client)
            .field("conversion", &self.options.conversion())
            .field("entities", &self.model.len())
            .finish()
    }
}
