//! Model definition files
//!
//! A definition lists entity types, their annotations and their
//! per-store-object overrides in TOML:
//!
//! ```toml
//! [[entity_types]]
//! name = "Customer"
//! annotations = { "Relational:TableName" = "Customers" }
//!
//! [[entity_types.overrides]]
//! store_object = { kind = "view", name = "CustomerView", schema = "sales" }
//! annotations = { "Relational:ColumnName" = "customer_id" }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use relmodel_core::{
    AnnotationValue, Config, ConfigError, ConfigurationSource, EntityTypeId, ModelError,
    StoreObjectIdentifier,
};
use relmodel_runtime::RuntimeModel;

use crate::builder::ModelBuilder;

/// Root of a model definition file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Entity types in declaration order
    #[serde(default)]
    pub entity_types: Vec<EntityTypeDefinition>,
}

/// One entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityTypeDefinition {
    /// Entity type name
    pub name: String,

    /// Annotations on the entity type itself
    #[serde(default)]
    pub annotations: BTreeMap<String, AnnotationValue>,

    /// Overrides per store object
    #[serde(default)]
    pub overrides: Vec<OverridesDefinition>,
}

/// Overrides of an entity type for one store object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverridesDefinition {
    /// Target store object
    pub store_object: StoreObjectIdentifier,

    /// Override facets
    #[serde(default)]
    pub annotations: BTreeMap<String, AnnotationValue>,
}

/// Errors from loading or applying a definition
#[derive(Debug, thiserror::Error)]
pub enum DefinitionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ModelDefinition {
    /// Load a definition from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, DefinitionError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&contents)
    }

    /// Parse a definition from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, DefinitionError> {
        toml::from_str(toml)
            .map_err(|e| DefinitionError::Config(ConfigError::ParseError(e.to_string())))
    }

    /// Add every entity type and override of this definition to `builder`
    ///
    /// All values are applied as explicit configuration. Store objects
    /// declared without a schema get the builder's default schema.
    pub fn apply(&self, builder: &mut ModelBuilder) -> Result<Vec<EntityTypeId>, DefinitionError> {
        let default_schema = builder.config().default_schema.clone();
        let mut ids = Vec::with_capacity(self.entity_types.len());

        for definition in &self.entity_types {
            let id = builder.add_entity_type(definition.name.clone())?;

            let entity_type = builder.entity_type_mut(id)?;
            for (name, value) in &definition.annotations {
                entity_type.set_annotation(name.clone(), value.clone(), ConfigurationSource::Explicit)?;
            }

            for overrides in &definition.overrides {
                let store_object = overrides
                    .store_object
                    .clone()
                    .with_default_schema(default_schema.as_deref());

                let record = builder.get_or_create_overrides(id, store_object)?;
                for (name, value) in &overrides.annotations {
                    record.set_annotation(name.clone(), value.clone(), ConfigurationSource::Explicit)?;
                }
            }

            ids.push(id);
        }

        tracing::debug!(entity_types = ids.len(), "applied model definition");
        Ok(ids)
    }

    /// Build and finalize a model from this definition
    pub fn build(&self, config: Config) -> Result<RuntimeModel, DefinitionError> {
        let mut builder = ModelBuilder::with_config(config);
        self.apply(&mut builder)?;
        Ok(builder.finalize()?)
    }
}
