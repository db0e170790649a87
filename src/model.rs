//! Entity Model
//!
//! Schema description built by a context's model-building hook: per entity, the
//! table it lives in, its key attributes and the properties left out of stored
//! records.

use crate::error::{require_non_blank, ContextError};
use crate::types::TypeKey;
use std::collections::{BTreeSet, HashMap};

/// Mapping of one entity type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityModel {
    entity: TypeKey,
    table_name: Option<String>,
    hash_key: Option<String>,
    range_key: Option<String>,
    ignored: BTreeSet<String>,
}

impl EntityModel {
    fn new(entity: TypeKey) -> Self {
        Self {
            entity,
            table_name: None,
            hash_key: None,
            range_key: None,
            ignored: BTreeSet::new(),
        }
    }

    pub fn entity(&self) -> TypeKey {
        self.entity
    }

    pub fn table_name(&self) -> Option<&str> {
        self.table_name.as_deref()
    }

    pub fn hash_key(&self) -> Option<&str> {
        self.hash_key.as_deref()
    }

    pub fn range_key(&self) -> Option<&str> {
        self.range_key.as_deref()
    }

    pub fn is_ignored(&self, property: &str) -> bool {
        self.ignored.contains(property)
    }

    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignored.iter().map(String::as_str)
    }
}

/// Builder handed to the model-building hook
#[derive(Debug, Default)]
pub struct ModelBuilder {
    entities: HashMap<TypeKey, EntityModel>,
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure entity `E`. Repeated calls refine the same mapping.
    pub fn entity<E: 'static>(&mut self) -> EntityTypeBuilder<'_> {
        let entity = TypeKey::of::<E>();
        let model = self
            .entities
            .entry(entity)
            .or_insert_with(|| EntityModel::new(entity));
        EntityTypeBuilder { model }
    }

    pub fn build(self) -> Model {
        Model {
            entities: self.entities,
        }
    }
}

/// Fluent configuration of one entity
pub struct EntityTypeBuilder<'a> {
    model: &'a mut EntityModel,
}

impl EntityTypeBuilder<'_> {
    pub fn has_table(&mut self, table_name: &str) -> Result<&mut Self, ContextError> {
        let table_name = require_non_blank(table_name, "table_name")?;
        self.model.table_name = Some(table_name.to_string());
        Ok(self)
    }

    /// Partition key attribute
    pub fn has_hash_key(&mut self, attribute: &str) -> Result<&mut Self, ContextError> {
        let attribute = require_non_blank(attribute, "hash_key")?;
        self.model.hash_key = Some(attribute.to_string());
        Ok(self)
    }

    /// Sort key attribute
    pub fn has_range_key(&mut self, attribute: &str) -> Result<&mut Self, ContextError> {
        let attribute = require_non_blank(attribute, "range_key")?;
        self.model.range_key = Some(attribute.to_string());
        Ok(self)
    }

    /// Leave `property` out of stored records
    pub fn ignore(&mut self, property: &str) -> Result<&mut Self, ContextError> {
        let property = require_non_blank(property, "property")?;
        self.model.ignored.insert(property.to_string());
        Ok(self)
    }
}

/// Finished entity model of a context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    entities: HashMap<TypeKey, EntityModel>,
}

impl Model {
    pub fn entity<E: 'static>(&self) -> Option<&EntityModel> {
        self.get(&TypeKey::of::<E>())
    }

    pub fn get(&self, entity: &TypeKey) -> Option<&EntityModel> {
        self.entities.get(entity)
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityModel> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
